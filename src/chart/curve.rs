#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    CubicTo {
        c1: (f64, f64),
        c2: (f64, f64),
        to: (f64, f64),
    },
    Close,
}

/// Cubic interpolation that stays monotone in y between neighbouring points, assuming points are
/// ordered by x. Consecutive duplicate points are skipped.
pub fn monotone_x(points: &[(f64, f64)]) -> Vec<PathCommand> {
    let mut curve = MonotoneX::default();

    for &(x, y) in points {
        curve.point(x, y);
    }

    curve.finish()
}

struct MonotoneX {
    commands: Vec<PathCommand>,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    t0: f64,
    state: u8,
}

impl Default for MonotoneX {
    fn default() -> Self {
        Self {
            commands: vec![],
            x0: f64::NAN,
            y0: f64::NAN,
            x1: f64::NAN,
            y1: f64::NAN,
            t0: f64::NAN,
            state: 0,
        }
    }
}

impl MonotoneX {
    fn point(&mut self, x: f64, y: f64) {
        if x == self.x1 && y == self.y1 {
            return;
        }

        let mut t1 = f64::NAN;
        match self.state {
            0 => {
                self.state = 1;
                self.commands.push(PathCommand::MoveTo(x, y));
            }
            1 => {
                self.state = 2;
            }
            2 => {
                self.state = 3;
                t1 = self.slope3(x, y);
                let t0 = self.slope2(t1);
                self.bezier(t0, t1);
            }
            _ => {
                t1 = self.slope3(x, y);
                self.bezier(self.t0, t1);
            }
        }

        self.x0 = self.x1;
        self.x1 = x;
        self.y0 = self.y1;
        self.y1 = y;
        self.t0 = t1;
    }

    fn finish(mut self) -> Vec<PathCommand> {
        match self.state {
            1 => self.commands.push(PathCommand::Close),
            2 => self.commands.push(PathCommand::LineTo(self.x1, self.y1)),
            3 => {
                let t1 = self.slope2(self.t0);
                self.bezier(self.t0, t1);
            }
            _ => {}
        }

        self.commands
    }

    /// Tangent at the middle point (x1, y1) given the next point (x2, y2).
    fn slope3(&self, x2: f64, y2: f64) -> f64 {
        let h0 = self.x1 - self.x0;
        let h1 = x2 - self.x1;
        let s0 = (self.y1 - self.y0) / nonzero_or_signed_zero(h0, h1);
        let s1 = (y2 - self.y1) / nonzero_or_signed_zero(h1, h0);
        let p = (s0 * h1 + s1 * h0) / (h0 + h1);

        let slope = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
        if slope.is_nan() { 0.0 } else { slope }
    }

    /// One-sided tangent at an end point, given the tangent at its neighbour.
    fn slope2(&self, t: f64) -> f64 {
        let h = self.x1 - self.x0;
        if h != 0.0 && !h.is_nan() {
            (3.0 * (self.y1 - self.y0) / h - t) / 2.0
        } else {
            t
        }
    }

    fn bezier(&mut self, t0: f64, t1: f64) {
        let dx = (self.x1 - self.x0) / 3.0;

        self.commands.push(PathCommand::CubicTo {
            c1: (self.x0 + dx, self.y0 + dx * t0),
            c2: (self.x1 - dx, self.y1 - dx * t1),
            to: (self.x1, self.y1),
        });
    }
}

fn sign(x: f64) -> f64 {
    if x < 0.0 { -1.0 } else { 1.0 }
}

fn nonzero_or_signed_zero(h: f64, other: f64) -> f64 {
    if h != 0.0 {
        h
    } else if other < 0.0 {
        -0.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn end_points(commands: &[PathCommand]) -> Vec<(f64, f64)> {
        commands
            .iter()
            .filter_map(|c| match c {
                PathCommand::MoveTo(x, y) | PathCommand::LineTo(x, y) => Some((*x, *y)),
                PathCommand::CubicTo { to, .. } => Some(*to),
                PathCommand::Close => None,
            })
            .collect()
    }

    #[test]
    fn test_monotone_x_empty() {
        assert!(monotone_x(&[]).is_empty());
    }

    #[test]
    fn test_monotone_x_single_point() {
        assert_eq!(
            monotone_x(&[(10.0, 20.0)]),
            vec![PathCommand::MoveTo(10.0, 20.0), PathCommand::Close]
        );
    }

    #[test]
    fn test_monotone_x_two_points_is_straight() {
        assert_eq!(
            monotone_x(&[(0.0, 0.0), (10.0, 5.0)]),
            vec![PathCommand::MoveTo(0.0, 0.0), PathCommand::LineTo(10.0, 5.0)]
        );
    }

    #[test]
    fn test_monotone_x_passes_through_points() {
        let points = vec![(0.0, 10.0), (10.0, 20.0), (20.0, 15.0), (30.0, 40.0)];
        let commands = monotone_x(&points);

        assert_eq!(commands.len(), 4);
        assert_eq!(end_points(&commands), points);
    }

    #[test]
    fn test_monotone_x_collinear_points() {
        let commands = monotone_x(&[(0.0, 0.0), (3.0, 3.0), (6.0, 6.0)]);

        assert_eq!(
            commands,
            vec![
                PathCommand::MoveTo(0.0, 0.0),
                PathCommand::CubicTo {
                    c1: (1.0, 1.0),
                    c2: (2.0, 2.0),
                    to: (3.0, 3.0)
                },
                PathCommand::CubicTo {
                    c1: (4.0, 4.0),
                    c2: (5.0, 5.0),
                    to: (6.0, 6.0)
                },
            ]
        );
    }

    #[test]
    fn test_monotone_x_flat_at_extremum() {
        let commands = monotone_x(&[(0.0, 0.0), (3.0, 6.0), (6.0, 0.0)]);

        // The peak gets a horizontal tangent, so the control points beside it share its y
        match (commands[1], commands[2]) {
            (PathCommand::CubicTo { c2, to, .. }, PathCommand::CubicTo { c1, .. }) => {
                assert_eq!(c2.1, to.1);
                assert_eq!(c1.1, to.1);
            }
            _ => panic!("expected cubic segments"),
        }
    }

    #[test]
    fn test_monotone_x_skips_duplicate_points() {
        assert_eq!(
            monotone_x(&[(0.0, 0.0), (0.0, 0.0), (10.0, 5.0)]),
            vec![PathCommand::MoveTo(0.0, 0.0), PathCommand::LineTo(10.0, 5.0)]
        );
    }

    #[test]
    fn test_monotone_x_same_x_does_not_produce_nan() {
        let commands = monotone_x(&[(0.0, 0.0), (5.0, 2.0), (5.0, 4.0), (10.0, 1.0)]);

        for command in commands {
            if let PathCommand::CubicTo { c1, c2, to } = command {
                assert!(c1.0.is_finite() && c1.1.is_finite());
                assert!(c2.0.is_finite() && c2.1.is_finite());
                assert!(to.0.is_finite() && to.1.is_finite());
            }
        }
    }
}
