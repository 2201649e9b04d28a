use crate::Widget;

/// A text label. Labels take no input.
#[derive(Debug, Default, Clone, Copy)]
pub struct Label;

impl Widget for Label {}

/// A grouping node whose children do the work.
#[derive(Debug, Default, Clone, Copy)]
pub struct Container;

impl Widget for Container {}
