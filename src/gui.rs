pub mod chart_viewer;
