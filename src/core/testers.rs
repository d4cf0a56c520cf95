//! Applicability testers for renderer selection.
//!
//! A tester decides whether a renderer can handle a (uischema, schema)
//! pair; a ranked tester additionally says how strongly. The schema a
//! tester sees is the one resolved at the control's scope, not the
//! document root. Testers are pure: two arguments in, verdict out.

use crate::schema::model::JsonSchema;
use crate::schema::uischema::UiSchema;

/// Boolean applicability predicate.
pub type Tester = Box<dyn Fn(&UiSchema, &JsonSchema) -> bool>;

/// Ranked predicate: `None` means not applicable; higher ranks win.
pub type RankedTester = Box<dyn Fn(&UiSchema, &JsonSchema) -> Option<u8>>;

/// Matches when the UI element's type tag equals `tag`.
pub fn ui_type_is(tag: &'static str) -> Tester {
    Box::new(move |uischema, _| uischema.type_tag() == tag)
}

/// Matches when `predicate` holds for the resolved schema.
pub fn schema_matches<F>(predicate: F) -> Tester
where
    F: Fn(&JsonSchema) -> bool + 'static,
{
    Box::new(move |_, schema| predicate(schema))
}

/// Matches when every given tester matches.
pub fn and(testers: Vec<Tester>) -> Tester {
    Box::new(move |uischema, schema| testers.iter().all(|tester| tester(uischema, schema)))
}

/// Promote a boolean tester to a ranked one with a fixed rank.
pub fn rank_with(rank: u8, tester: Tester) -> RankedTester {
    Box::new(move |uischema, schema| tester(uischema, schema).then_some(rank))
}
