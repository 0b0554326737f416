//! Tests for the codemod registry.

use std::sync::Arc;

use codemod_core::{
    Codemod, CodemodError, CodemodRegistry, FileContext, RegistryError, ReviewRisk,
    RuleDescriptor, SourceTree, TransformOutput, default_registry,
};

struct Noop(RuleDescriptor);

impl Noop {
    fn arc(id: &str) -> Arc<dyn Codemod> {
        Arc::new(Self(RuleDescriptor::new(id, "noop", ReviewRisk::AutoFix)))
    }
}

impl Codemod for Noop {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.0
    }

    fn transform(
        &self,
        tree: SourceTree,
        _file: &FileContext<'_>,
    ) -> Result<TransformOutput, CodemodError> {
        Ok(TransformOutput::unchanged(tree))
    }
}

fn ids(codemods: &[Arc<dyn Codemod>]) -> Vec<String> {
    codemods.iter().map(|c| c.descriptor().id.clone()).collect()
}

#[test]
fn test_registration_order_and_lookup() {
    let mut registry = CodemodRegistry::new();
    registry.register(Noop::arc("b")).expect("Register b");
    registry.register(Noop::arc("a")).expect("Register a");

    let listed: Vec<&str> = registry.list_all().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(listed, vec!["b", "a"]);
    assert_eq!(registry.lookup("a").expect("Lookup a").summary, "noop");
    assert_eq!(
        registry.lookup("c").unwrap_err(),
        RegistryError::NotFound("c".to_string())
    );
}

#[test]
fn test_duplicate_id_rejected() {
    let mut registry = CodemodRegistry::new();
    registry.register(Noop::arc("a")).expect("Register a");
    assert_eq!(
        registry.register(Noop::arc("a")),
        Err(RegistryError::DuplicateRuleId("a".to_string()))
    );
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_closed_registry_rejects_registration() {
    let mut registry = CodemodRegistry::new().closed();
    assert!(registry.is_closed());
    assert_eq!(
        registry.register(Noop::arc("late")),
        Err(RegistryError::RegistryClosed("late".to_string()))
    );
    assert!(registry.is_empty());
}

#[test]
fn test_select_include_exclude() {
    let mut registry = CodemodRegistry::new();
    for id in ["a", "b", "c"] {
        registry.register(Noop::arc(id)).expect("Register");
    }

    let all = registry.select::<&str>(&[], &[]).expect("Select all");
    assert_eq!(ids(&all), vec!["a", "b", "c"]);

    let some = registry.select(&["c", "a"], &["c"]).expect("Select some");
    assert_eq!(ids(&some), vec!["a"]);

    assert!(matches!(
        registry.select(&["zzz"], &[]),
        Err(RegistryError::NotFound(id)) if id == "zzz"
    ));
}

#[test]
fn test_default_registry_is_closed() {
    let registry = default_registry().expect("Build default registry");
    assert!(registry.is_closed());
    assert_eq!(
        ids(registry.codemods()),
        vec![
            "django-session-cookie-secure-off",
            "limit-readline",
            "remove-unnecessary-f-str"
        ]
    );
    assert!(registry.lookup("remove-unnecessary-f-str").expect("Lookup").always_eligible);
    assert!(!registry.lookup("limit-readline").expect("Lookup").always_eligible);
}
