//! Reusable rendering components shared by the chart and table views.

pub mod bar;
