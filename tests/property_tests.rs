//! Property-based tests for root resolution.
//!
//! These tests use proptest to verify the resolver's rules hold across
//! randomly generated workspaces.

use std::cell::Cell;
use std::path::{Path, PathBuf};

use proptest::prelude::*;

use prompt_launcher::core::types::{LocationHint, ProjectRoot};
use prompt_launcher::resolver::{resolve, ResolutionRule};
use prompt_launcher::ui::prompts::{Choice, PromptError, Prompter};

/// Picks a fixed index and counts calls.
struct CountingPrompter {
    pick: Option<usize>,
    calls: Cell<usize>,
}

impl CountingPrompter {
    fn new(pick: Option<usize>) -> Self {
        Self {
            pick,
            calls: Cell::new(0),
        }
    }
}

impl Prompter for CountingPrompter {
    fn select(&self, _: &str, _: &[Choice]) -> Result<Option<usize>, PromptError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.pick)
    }
}

/// Strategy for one path component.
fn component() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,7}"
}

/// Strategy for a relative path of 1..4 components.
fn relative_path() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec(component(), 1..4).prop_map(|parts| parts.iter().collect())
}

/// Strategy for 2..6 distinct sibling roots under `/ws`.
fn sibling_roots() -> impl Strategy<Value = Vec<ProjectRoot>> {
    prop::collection::btree_set(component(), 2..6).prop_map(|names| {
        names
            .into_iter()
            .map(|n| ProjectRoot::from_path(Path::new("/ws").join(n)).unwrap())
            .collect()
    })
}

fn hint(path: &Path) -> LocationHint {
    LocationHint::resolve(path, Path::new("/")).unwrap()
}

proptest! {
    /// One open root always wins, whatever the hint, without prompting.
    #[test]
    fn single_root_always_chosen(
        root in relative_path(),
        hint_path in prop::option::of(relative_path()),
        active in prop::option::of(relative_path()),
    ) {
        let open = vec![ProjectRoot::from_path(Path::new("/").join(&root)).unwrap()];
        let prompter = CountingPrompter::new(None);
        let hint = hint_path.map(|p| hint(&Path::new("/").join(p)));
        let active = active.map(|p| Path::new("/other").join(p));

        let resolved = resolve(hint.as_ref(), &open, active.as_deref(), &prompter)
            .unwrap()
            .unwrap();

        prop_assert_eq!(resolved.path(), open[0].path());
        prop_assert_eq!(prompter.calls.get(), 0);
    }

    /// A hint inside one of several sibling roots selects that root.
    #[test]
    fn hint_selects_its_sibling(
        open in sibling_roots(),
        index in any::<prop::sample::Index>(),
        rest in relative_path(),
    ) {
        let target = &open[index.index(open.len())];
        let prompter = CountingPrompter::new(None);
        let hint = hint(&target.path().join(rest));

        let resolved = resolve(Some(&hint), &open, None, &prompter).unwrap().unwrap();

        prop_assert_eq!(resolved.path(), target.path());
        prop_assert_eq!(resolved.rule, ResolutionRule::Hint);
        prop_assert_eq!(prompter.calls.get(), 0);
    }

    /// With nested roots the deepest one containing the hint wins,
    /// regardless of the order roots are listed in.
    #[test]
    fn nested_roots_pick_deepest(
        chain in prop::collection::vec(component(), 2..5),
        depth in any::<prop::sample::Index>(),
        rest in relative_path(),
        order in any::<prop::sample::Index>(),
    ) {
        let mut open: Vec<ProjectRoot> = (1..=chain.len())
            .map(|n| {
                let path: PathBuf = std::iter::once("/".to_string())
                    .chain(chain[..n].iter().cloned())
                    .collect();
                ProjectRoot::from_path(path).unwrap()
            })
            .collect();
        let expected = open[depth.index(open.len())].clone();
        let len = open.len();
        open.rotate_left(order.index(len));

        // Prefix the remainder so it cannot coincide with a deeper root.
        let hint = hint(&expected.path().join("~hint").join(rest));
        let prompter = CountingPrompter::new(None);

        let resolved = resolve(Some(&hint), &open, None, &prompter).unwrap().unwrap();
        prop_assert_eq!(resolved.path(), expected.path());
    }

    /// Ambiguous workspaces always prompt, and the result is exactly the
    /// pick or a cancellation.
    #[test]
    fn ambiguity_is_settled_by_the_user(
        open in sibling_roots(),
        pick in prop::option::of(any::<prop::sample::Index>()),
    ) {
        let pick = pick.map(|i| i.index(open.len()));
        let prompter = CountingPrompter::new(pick);
        let outside = hint(Path::new("/elsewhere/file"));

        let resolved = resolve(Some(&outside), &open, None, &prompter).unwrap();

        prop_assert_eq!(prompter.calls.get(), 1);
        match pick {
            Some(i) => {
                let resolved = resolved.unwrap();
                prop_assert_eq!(resolved.path(), open[i].path());
                prop_assert_eq!(resolved.rule, ResolutionRule::UserChoice);
            }
            None => prop_assert!(resolved.is_none()),
        }
    }
}
