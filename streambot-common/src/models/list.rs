/// How a list item is selected: a 1-based index (negative counts from the
/// end), the stateful round-robin cursor, or a uniform random pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSelector {
    Next,
    Random,
    Index(i64),
}

impl ListSelector {
    pub fn parse(s: &str) -> Option<ListSelector> {
        match s {
            "next" => Some(ListSelector::Next),
            "random" => Some(ListSelector::Random),
            other => other.parse::<i64>().ok().map(ListSelector::Index),
        }
    }
}
