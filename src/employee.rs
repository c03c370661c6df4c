use std::fmt;

use crate::copy::{CopyMode, Replicate};
use crate::properties::Properties;
use crate::result::{FacsimileError, FacsimileResult};

/// A single employee record.
///
/// Equality compares every field, and properties by content.
#[derive(PartialEq, Eq, Default)]
pub struct Employee {
    id: i32,
    name: Option<String>,
    password: Option<String>,
    properties: Option<Properties>,
}

impl Employee {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn set_password(&mut self, password: Option<String>) {
        self.password = password;
    }

    pub fn properties(&self) -> Option<&Properties> {
        self.properties.as_ref()
    }

    pub fn set_properties(&mut self, properties: Option<Properties>) {
        self.properties = properties;
    }

    /// Builder-style [`Employee::set_properties`].
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Builder-style [`Employee::set_password`].
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

impl Replicate for Employee {
    fn replicate(&self, mode: CopyMode) -> FacsimileResult<Self> {
        let properties = match mode {
            CopyMode::Shallow => self.properties.as_ref().map(Properties::share),
            CopyMode::Deep => Some(
                self.properties
                    .as_ref()
                    .ok_or(FacsimileError::NullReference)?
                    .detach(),
            ),
        };

        tracing::debug!(id = self.id, ?mode, "copied employee");

        Ok(Self {
            id: self.id,
            name: self.name.clone(),
            password: self.password.clone(),
            properties,
        })
    }
}

impl fmt::Debug for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Employee")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("properties", &self.properties)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copy::copy;

    fn pankaj() -> Employee {
        Employee::new(1, "Pankaj").with_properties(
            [("salary", "10000"), ("city", "Bangalore"), ("title", "CEO")]
                .into_iter()
                .collect(),
        )
    }

    #[test]
    fn deep_copy_is_independent() {
        let emp = pankaj();
        let cloned = copy(&emp, CopyMode::Deep).unwrap();

        let (source, copied) = (emp.properties().unwrap(), cloned.properties().unwrap());
        assert!(!source.ptr_eq(copied));
        assert_eq!(source, copied);

        source.insert("title", "CFO");
        source.insert("zip", "560001");

        assert_eq!(copied.get("title").as_deref(), Some("CEO"));
        assert!(!copied.contains_key("zip"));

        copied.remove("city");
        assert!(source.contains_key("city"));
    }

    #[test]
    fn shallow_copy_aliases_properties() {
        let emp = pankaj();
        let cloned = copy(&emp, CopyMode::Shallow).unwrap();

        let (source, copied) = (emp.properties().unwrap(), cloned.properties().unwrap());
        assert!(source.ptr_eq(copied));

        source.insert("title", "CFO");
        assert_eq!(copied.get("title").as_deref(), Some("CFO"));
    }

    #[test]
    fn deep_copy_requires_properties() {
        let emp = Employee::new(7, "Lisa");

        assert!(matches!(
            copy(&emp, CopyMode::Deep),
            Err(FacsimileError::NullReference)
        ));
    }

    #[test]
    fn shallow_copy_keeps_unset_properties() {
        let emp = Employee::new(7, "Lisa");
        let cloned = copy(&emp, CopyMode::Shallow).unwrap();

        assert!(cloned.properties().is_none());
        assert_eq!(cloned, emp);
    }

    #[test]
    fn copies_do_not_alias_scalars() {
        let emp = pankaj().with_password("hunter2");
        let mut cloned = copy(&emp, CopyMode::Deep).unwrap();

        cloned.set_id(2);
        cloned.set_name(Some("David".to_owned()));

        assert_eq!(emp.id(), 1);
        assert_eq!(emp.name(), Some("Pankaj"));
        assert_eq!(cloned.password(), Some("hunter2"));
    }

    #[test]
    fn debug_redacts_password() {
        let emp = Employee::new(3, "Meghna").with_password("hunter2");
        let printed = format!("{:?}", emp);

        assert!(printed.contains("<redacted>"));
        assert!(!printed.contains("hunter2"));
    }
}
