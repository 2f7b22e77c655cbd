//! Action resolution
//!
//! Turns a watcher's declared [`ActionPlan`] plus the defaults into the
//! concrete command lines to execute, with `%URL%` and `%NAME%` substituted.

use crate::domain::models::{ActionPlan, WatcherSpec};

/// Placeholder replaced with the watcher's URL
pub const URL_VAR: &str = "%URL%";
/// Placeholder replaced with the watcher's name
pub const NAME_VAR: &str = "%NAME%";

/// Values substituted into command templates
#[derive(Debug, Clone, Copy)]
pub struct TemplateVars<'a> {
    pub name: &'a str,
    pub url: &'a str,
}

impl<'a> TemplateVars<'a> {
    pub const fn new(name: &'a str, url: &'a str) -> Self {
        Self { name, url }
    }

    pub fn for_watcher(spec: &'a WatcherSpec) -> Self {
        Self::new(&spec.name, &spec.url)
    }

    /// Replace every placeholder occurrence in `template`.
    pub fn substitute(&self, template: &str) -> String {
        template.replace(URL_VAR, self.url).replace(NAME_VAR, self.name)
    }
}

/// Resolve the ordered command sequence for one watcher.
///
/// - Both plans phased: every phase falls back to the default independently.
/// - Otherwise the watcher's plan is used whole if non-empty, else the default plan whole.
///
/// The result never contains blank commands.
pub fn resolve(watcher: &ActionPlan, defaults: &ActionPlan, vars: &TemplateVars<'_>) -> Vec<String> {
    let lines = match (watcher, defaults) {
        (ActionPlan::ThreePhase(own), ActionPlan::ThreePhase(fallback)) => {
            own.or_phases(fallback).ordered()
        }
        (plan, fallback) if plan.is_empty() => fallback.command_lines(),
        (plan, _) => plan.command_lines(),
    };

    lines.iter().map(|line| vars.substitute(line)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{CommandTemplate, PhasedActions};

    const VARS: TemplateVars<'static> = TemplateVars::new("clinic-A", "https://example.com/book");

    fn list(commands: &[&str]) -> ActionPlan {
        ActionPlan::OrderedList(commands.iter().map(|c| CommandTemplate::from(*c)).collect())
    }

    fn phased(pre: Option<&str>, main: Option<&str>, post: Option<&str>) -> ActionPlan {
        let own = |s: Option<&str>| s.map(str::to_string);
        ActionPlan::ThreePhase(PhasedActions::new(own(pre), own(main), own(post)))
    }

    #[test]
    fn test_substitution() {
        assert_eq!(
            VARS.substitute("notify %NAME% at %URL%"),
            "notify clinic-A at https://example.com/book"
        );
    }

    #[test]
    fn test_substitution_replaces_every_occurrence() {
        assert_eq!(VARS.substitute("%NAME%/%NAME%"), "clinic-A/clinic-A");
    }

    #[test]
    fn test_watcher_list_wins_over_defaults() {
        let resolved = resolve(&list(&["mine %NAME%"]), &list(&["default"]), &VARS);
        assert_eq!(resolved, vec!["mine clinic-A"]);
    }

    #[test]
    fn test_empty_watcher_list_uses_defaults_in_order() {
        let resolved = resolve(&list(&[]), &list(&["one", "two %URL%"]), &VARS);
        assert_eq!(resolved, vec!["one", "two https://example.com/book"]);
    }

    #[test]
    fn test_token_lists_are_joined() {
        let plan = ActionPlan::OrderedList(vec![CommandTemplate::Tokens(vec![
            "open".into(),
            "%URL%".into(),
        ])]);
        assert_eq!(
            resolve(&plan, &ActionPlan::default(), &VARS),
            vec!["open https://example.com/book"]
        );
    }

    #[test]
    fn test_three_phase_order() {
        let plan = phased(Some("a"), Some("b"), Some("c"));
        assert_eq!(resolve(&plan, &ActionPlan::default(), &VARS), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_three_phase_skips_empty_slots() {
        let plan = phased(None, Some("b"), None);
        assert_eq!(resolve(&plan, &ActionPlan::default(), &VARS), vec!["b"]);
    }

    #[test]
    fn test_three_phase_falls_back_per_phase() {
        let plan = phased(None, Some("mine"), None);
        let defaults = phased(Some("pre"), Some("default"), Some("post"));
        assert_eq!(resolve(&plan, &defaults, &VARS), vec!["pre", "mine", "post"]);
    }

    #[test]
    fn test_mixed_dialects_use_whole_plan_precedence() {
        let defaults = phased(Some("pre"), Some("default"), None);
        assert_eq!(resolve(&list(&["x"]), &defaults, &VARS), vec!["x"]);
        assert_eq!(resolve(&list(&[]), &defaults, &VARS), vec!["pre", "default"]);
    }

    #[test]
    fn test_nothing_declared_resolves_to_nothing() {
        assert!(resolve(&ActionPlan::default(), &ActionPlan::default(), &VARS).is_empty());
    }

    #[test]
    fn test_blank_list_entries_are_dropped() {
        let resolved = resolve(&list(&["", "  ", "real"]), &ActionPlan::default(), &VARS);
        assert_eq!(resolved, vec!["real"]);
    }
}
