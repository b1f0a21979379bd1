use super::TerminationCondition;

/// A [`TerminationCondition`] which never triggers. The engine stops only once the search is
/// exhausted or one of its limits is reached.
#[derive(Clone, Copy, Debug)]
pub struct Indefinite;

impl TerminationCondition for Indefinite {
    fn should_stop(&mut self) -> bool {
        false
    }
}
