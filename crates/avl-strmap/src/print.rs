/// Renders one child subtree, given the indentation prefix for its own lines.
pub type PrintChild<'a> = dyn Fn(&str) -> String + 'a;

/// Lays out the two child renderings of a binary node under its label line.
///
/// The left child hangs off a `├─` branch, the right one off `└─`. Lines
/// below the left child keep a `│` rail so the right branch stays connected.
pub fn print_binary(tab: &str, left: &PrintChild, right: &PrintChild) -> String {
    let left = left(&format!("{tab}│  "));
    let right = right(&format!("{tab}   "));
    format!("\n{tab}├─ {left}\n{tab}└─ {right}")
}
