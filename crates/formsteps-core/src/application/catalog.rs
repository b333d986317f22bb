use std::sync::Arc;
use tracing::debug;

use crate::domain::hooks::ExtensionRegistry;
use crate::domain::layout::LayoutConfig;
use crate::domain::record::Record;
use crate::domain::session::FormSession;
use crate::domain::step::{StepDefinition, StepSequence};
use crate::StepsError;

/// Resolves declared field groups into the ordered step sequence
pub struct StepCatalog {
    registry: Arc<ExtensionRegistry>,
    format_type: String,
}

impl StepCatalog {
    /// Create a catalog for groups of the given format type
    pub fn new(registry: Arc<ExtensionRegistry>, format_type: impl Into<String>) -> Self {
        Self {
            registry,
            format_type: format_type.into(),
        }
    }

    /// Resolve the steps for a record.
    ///
    /// Groups of the step format type are ordered by weight; ties keep the
    /// declaration order. When at least one step is declared the alter-steps
    /// hooks run on the ordered steps. An empty result means the record's
    /// form has no steps.
    pub fn resolve(
        &self,
        layout: &LayoutConfig,
        record: &dyn Record,
        session: &FormSession,
    ) -> Result<StepSequence, StepsError> {
        let mut candidates: Vec<StepDefinition> = layout
            .groups_of_type(&self.format_type)
            .map(|(name, entry)| entry.to_step(name))
            .collect();
        candidates.sort_by_key(|step| step.weight);

        let mut steps: StepSequence = candidates.into_iter().collect();
        if steps.is_empty() {
            debug!(
                entity_type = record.entity_type_id(),
                bundle = record.bundle(),
                "No steps declared"
            );
            return Ok(steps);
        }

        self.registry.alter_steps(&mut steps, session, record)?;

        debug!(
            entity_type = record.entity_type_id(),
            bundle = record.bundle(),
            steps = steps.len(),
            "Resolved form steps"
        );
        Ok(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hooks::HookScope;
    use crate::domain::layout::LayoutEntry;
    use crate::domain::step::StepKey;
    use crate::domain::store::tests::MapStore;
    use pretty_assertions::assert_eq;

    #[derive(Debug)]
    struct Page;

    impl Record for Page {
        fn is_new(&self) -> bool {
            false
        }
        fn id(&self) -> Option<String> {
            Some("1".to_string())
        }
        fn entity_type_id(&self) -> &str {
            "node"
        }
        fn bundle(&self) -> &str {
            "page"
        }
    }

    fn keys(steps: &StepSequence) -> Vec<&str> {
        steps.keys().map(StepKey::as_str).collect()
    }

    fn session() -> FormSession {
        FormSession::new(Arc::new(MapStore::default()))
    }

    #[test]
    fn test_orders_by_weight_and_keeps_ties_stable() {
        let layout = LayoutConfig::new()
            .with_group("group_c", LayoutEntry::new("steps", 2))
            .with_group("group_a", LayoutEntry::new("steps", -1))
            .with_group("group_tie_1", LayoutEntry::new("steps", 1))
            .with_group("group_details", LayoutEntry::new("details", 0))
            .with_group("group_tie_2", LayoutEntry::new("steps", 1));
        let catalog = StepCatalog::new(Arc::new(ExtensionRegistry::new()), "steps");

        let steps = catalog.resolve(&layout, &Page, &session()).unwrap();
        assert_eq!(keys(&steps), vec!["group_a", "group_tie_1", "group_tie_2", "group_c"]);
    }

    #[test]
    fn test_no_candidates_skips_hooks() {
        let mut registry = ExtensionRegistry::new();
        registry.on_steps_alter(HookScope::Global, |_, _, _| anyhow::bail!("must not run"));
        let catalog = StepCatalog::new(Arc::new(registry), "steps");

        let layout = LayoutConfig::new().with_group("group_x", LayoutEntry::new("tabs", 0));
        let steps = catalog.resolve(&layout, &Page, &session()).unwrap();
        assert!(steps.is_empty());
    }

    #[test]
    fn test_hooks_can_append_a_confirmation_step() {
        let mut registry = ExtensionRegistry::new();
        registry.on_steps_alter(HookScope::bundle("node", "page"), |steps, _, _| {
            let mut confirm = steps.iter().next().cloned().unwrap();
            confirm.key = StepKey::from("confirm");
            confirm.settings.add_label = Some("Confirmation".to_string());
            confirm.settings.edit_label = Some("Confirmation".to_string());
            steps.insert(confirm);
            Ok(())
        });
        let catalog = StepCatalog::new(Arc::new(registry), "steps");
        let layout = LayoutConfig::new()
            .with_group("group_one", LayoutEntry::new("steps", 0))
            .with_group("group_two", LayoutEntry::new("steps", 1));

        let steps = catalog.resolve(&layout, &Page, &session()).unwrap();
        assert_eq!(keys(&steps), vec!["group_one", "group_two", "confirm"]);
        assert_eq!(steps.get("confirm").unwrap().settings.title(false), Some("Confirmation"));
    }

    #[test]
    fn test_hook_error_propagates() {
        let mut registry = ExtensionRegistry::new();
        registry.on_steps_alter(HookScope::entity_type("node"), |_, _, _| {
            anyhow::bail!("broken extension")
        });
        let catalog = StepCatalog::new(Arc::new(registry), "steps");
        let layout = LayoutConfig::new().with_group("group_one", LayoutEntry::new("steps", 0));

        let err = catalog.resolve(&layout, &Page, &session()).unwrap_err();
        assert!(matches!(err, StepsError::ExtensionHookError(msg) if msg.contains("broken extension")));
    }
}
