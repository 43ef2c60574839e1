use glam::IVec2;

/// Grid coordinate of a branch tip.
///
/// `x` is the column and `y` is the row, with rows growing downward, so
/// upward growth is a negative `y` step.
pub type Position = IVec2;

/// Display category of a painted cell.
///
/// How a style is shown (color, weight) is up to the renderer; the core only
/// tags cells with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Style {
    Branch,
    Leaf,
    Pot,
}

impl Style {
    /// Class name used in markup output.
    pub fn class_name(self) -> &'static str {
        match self {
            Style::Branch => "branch",
            Style::Leaf => "leaf",
            Style::Pot => "pot",
        }
    }
}
