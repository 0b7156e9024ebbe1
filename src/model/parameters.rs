use super::TypeHint;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageParameter {
    pub name: String,
    pub type_hint: TypeHint,
}

impl MessageParameter {
    pub fn new(name: impl Into<String>, type_hint: TypeHint) -> Self {
        Self {
            name: name.into(),
            type_hint,
        }
    }
}

/// Parameters of a message, unique by name and kept in first-seen order.
///
/// Adding a parameter that already exists merges the type hints instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageParameterSet {
    parameters: Vec<MessageParameter>,
}

impl MessageParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, parameter: MessageParameter) {
        match self.parameters.iter_mut().find(|p| p.name == parameter.name) {
            Some(existing) => existing.type_hint = existing.type_hint.merge(parameter.type_hint),
            None => self.parameters.push(parameter),
        }
    }

    pub fn union(&mut self, other: &MessageParameterSet) {
        for parameter in &other.parameters {
            self.add(parameter.clone());
        }
    }

    pub fn get(&self, name: &str) -> Option<&MessageParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageParameter> {
        self.parameters.iter()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl FromIterator<MessageParameter> for MessageParameterSet {
    fn from_iter<I: IntoIterator<Item = MessageParameter>>(iter: I) -> Self {
        let mut set = Self::new();
        for parameter in iter {
            set.add(parameter);
        }
        set
    }
}

impl<'a> IntoIterator for &'a MessageParameterSet {
    type Item = &'a MessageParameter;
    type IntoIter = std::slice::Iter<'a, MessageParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_merges_hints() {
        let mut set = MessageParameterSet::new();
        set.add(MessageParameter::new("count", TypeHint::None));
        set.add(MessageParameter::new("name", TypeHint::String));
        set.add(MessageParameter::new("count", TypeHint::Number));

        assert_eq!(
            set.iter().cloned().collect::<Vec<_>>(),
            vec![
                MessageParameter::new("count", TypeHint::Number),
                MessageParameter::new("name", TypeHint::String),
            ]
        );
    }

    #[test]
    fn test_conflicting_hints_become_mixed() {
        let set: MessageParameterSet = [
            MessageParameter::new("x", TypeHint::Number),
            MessageParameter::new("x", TypeHint::Datetime),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("x").map(|p| p.type_hint), Some(TypeHint::Mixed));
    }

    #[test]
    fn test_union_appends_new_names() {
        let mut left: MessageParameterSet = [MessageParameter::new("a", TypeHint::None)]
            .into_iter()
            .collect();
        let right: MessageParameterSet = [
            MessageParameter::new("b", TypeHint::None),
            MessageParameter::new("a", TypeHint::Number),
        ]
        .into_iter()
        .collect();
        left.union(&right);

        let names: Vec<_> = left.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(left.get("a").map(|p| p.type_hint), Some(TypeHint::Number));
    }
}
