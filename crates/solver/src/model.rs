use crate::{
    trail::Trail,
    Literal,
    Sign,
    Variable,
};
use bounded::BoundedArray;
use core::fmt;
use core::fmt::Display;

/// A complete satisfying assignment.
#[derive(Debug, Clone)]
pub struct Model {
    values: BoundedArray<Variable, Sign>,
}

impl Model {
    /// Captures the current trail as a model.
    ///
    /// A variable that never entered the trail (unreachable given the
    /// clause set) is treated as `Sign::POS` by convention, so presentation
    /// layers always see a total assignment.
    pub(crate) fn capture(num_variables: usize, trail: &Trail) -> Self {
        let values = BoundedArray::with_len(num_variables, |variable: Variable| {
            trail.value_of(variable).unwrap_or(Sign::POS)
        });
        Self { values }
    }

    /// Returns the value assigned to `variable`.
    pub fn value_of(&self, variable: Variable) -> Sign {
        self.values[variable]
    }

    /// Returns an iterator over the model's literals, one per variable, in
    /// variable order and matching the model's polarity.
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(index, &sign)| Literal::new(Variable::from_index(index).unwrap(), sign))
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.literals();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
            for literal in iter {
                write!(f, " {}", literal)?;
            }
        }
        Ok(())
    }
}

/// Holds the most recently found satisfying model, if any.
#[derive(Debug, Default, Clone)]
pub struct LastModel {
    model: Option<Model>,
}

impl LastModel {
    /// Overwrites the stored model with the trail's current assignment.
    pub(crate) fn update(&mut self, num_variables: usize, trail: &Trail) {
        self.model = Some(Model::capture(num_variables, trail));
    }

    /// Returns the stored model.
    ///
    /// # Panics
    ///
    /// If no model has been recorded yet.
    pub(crate) fn get(&self) -> &Model {
        self.model
            .as_ref()
            .expect("solve must record a model before returning SAT")
    }
}
