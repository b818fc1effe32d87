//! The panel controller: visibility state machine plus the settings draft.
//!
//! Every state change happens inside one synchronous handler call, driven
//! from the FLTK dispatch loop, so visibility flips and draft merges are
//! applied strictly in the order the UI events arrived.

use super::config::PanelConfig;
use super::draft::{FieldUpdate, RawFieldReport, SettingsDraft};
use super::error::{PanelError, Result};
use super::listeners::ListenerRegistry;
use super::messages::PanelMessage;
use super::options::OptionCatalog;
use super::outside_click::{OutsideClickDetector, RootRegion};
use super::visibility::Visibility;

/// Receives a copy of the draft when the user applies the form.
pub type ApplyCallback = Box<dyn FnMut(SettingsDraft)>;
/// Told that the user reset the form, before the draft is restored.
pub type ResetCallback = Box<dyn FnMut()>;

/// The UI event that triggered a form action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormEvent {
    default_prevented: bool,
}

impl FormEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// What handling a message did, so the view knows what to redraw.
#[derive(Debug)]
pub enum UpdateOutcome {
    VisibilityChanged(Visibility),
    DraftChanged,
    Applied,
    Reset,
    Ignored,
    Rejected(PanelError),
}

pub struct PanelController {
    visibility: Visibility,
    draft: SettingsDraft,
    defaults: SettingsDraft,
    catalog: OptionCatalog,
    detector: OutsideClickDetector,
    on_apply: Option<ApplyCallback>,
    on_reset: Option<ResetCallback>,
}

impl PanelController {
    pub fn new(config: PanelConfig, registry: ListenerRegistry, root: RootRegion) -> Self {
        let PanelConfig { catalog, defaults } = config;
        Self {
            visibility: Visibility::Closed,
            draft: defaults.clone(),
            defaults,
            catalog,
            detector: OutsideClickDetector::new(registry, root),
            on_apply: None,
            on_reset: None,
        }
    }

    pub fn on_apply(mut self, callback: impl FnMut(SettingsDraft) + 'static) -> Self {
        self.on_apply = Some(Box::new(callback));
        self
    }

    pub fn on_reset(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_reset = Some(Box::new(callback));
        self
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_open(&self) -> bool {
        self.visibility.is_open()
    }

    pub fn draft(&self) -> &SettingsDraft {
        &self.draft
    }

    pub fn defaults(&self) -> &SettingsDraft {
        &self.defaults
    }

    pub fn catalog(&self) -> &OptionCatalog {
        &self.catalog
    }

    pub fn root(&self) -> &RootRegion {
        self.detector.root()
    }

    pub fn detector_active(&self) -> bool {
        self.detector.is_active()
    }

    fn set_visibility(&mut self, next: Visibility) {
        if next != self.visibility {
            tracing::debug!(from = %self.visibility, to = %next, "panel visibility");
        }
        self.visibility = next;
        self.detector.set_active(next.is_open());
    }

    /// Toggle control activation.
    pub fn toggle(&mut self) -> Visibility {
        self.set_visibility(self.visibility.activate());
        self.visibility
    }

    /// Outside-interaction dismissal. Returns whether the panel was open.
    pub fn dismiss(&mut self) -> bool {
        if !self.is_open() {
            tracing::debug!("dismiss ignored: panel already closed");
            return false;
        }
        self.set_visibility(self.visibility.dismiss());
        true
    }

    /// Merge one field change into the draft. Rejected updates leave the
    /// draft as it was.
    pub fn change_field(&mut self, update: &FieldUpdate) -> Result<()> {
        self.draft.apply_update(update, &self.catalog)?;
        tracing::debug!(key = %update.key, value = %update.value, "draft updated");
        Ok(())
    }

    /// Merge a raw index report from a field control.
    pub fn report_field(&mut self, report: RawFieldReport) -> Result<()> {
        let update = report.to_update(&self.catalog)?;
        self.change_field(&update)
    }

    /// Hand a copy of the current draft to the apply callback.
    pub fn apply(&mut self, event: &mut FormEvent) {
        event.prevent_default();
        let snapshot = self.draft.clone();
        match self.on_apply.as_mut() {
            Some(callback) => {
                tracing::info!(draft = ?snapshot, "applying article parameters");
                callback(snapshot);
            }
            None => tracing::debug!("apply without a callback"),
        }
    }

    /// Notify the reset callback, then restore the default draft.
    pub fn reset(&mut self, event: &mut FormEvent) {
        event.prevent_default();
        if let Some(callback) = self.on_reset.as_mut() {
            callback();
        }
        self.draft = self.defaults.clone();
        tracing::info!("article parameters reset to defaults");
    }

    /// Single entry point for the dispatch loop. Errors are absorbed here:
    /// they are logged and returned as `Rejected`, never propagated.
    pub fn update(&mut self, msg: PanelMessage) -> UpdateOutcome {
        match msg {
            PanelMessage::ToggleActivated => UpdateOutcome::VisibilityChanged(self.toggle()),
            PanelMessage::Dismiss => {
                if self.dismiss() {
                    UpdateOutcome::VisibilityChanged(self.visibility)
                } else {
                    UpdateOutcome::Ignored
                }
            }
            PanelMessage::FieldReported(report) => field_outcome(self.report_field(report)),
            PanelMessage::FieldChanged(update) => field_outcome(self.change_field(&update)),
            PanelMessage::Apply => {
                self.apply(&mut FormEvent::new());
                UpdateOutcome::Applied
            }
            PanelMessage::Reset => {
                self.reset(&mut FormEvent::new());
                UpdateOutcome::Reset
            }
        }
    }
}

fn field_outcome(result: Result<()>) -> UpdateOutcome {
    match result {
        Ok(()) => UpdateOutcome::DraftChanged,
        Err(e) => {
            tracing::warn!(error = %e, "rejected field update");
            UpdateOutcome::Rejected(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::draft::tests::{sample_catalog, sample_defaults};
    use crate::app::draft::FieldKey;
    use crate::app::listeners::{Interaction, KeyPress, ListenerClass, Point, Rect};
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Harness {
        registry: ListenerRegistry,
        panel: PanelController,
        applied: Rc<RefCell<Vec<SettingsDraft>>>,
        resets: Rc<RefCell<usize>>,
    }

    impl Harness {
        fn new() -> Self {
            let catalog = sample_catalog();
            let defaults = sample_defaults(&catalog);
            let registry = ListenerRegistry::new();
            let root = RootRegion::new();
            root.attach(vec![Rect::new(0, 0, 300, 600)]);
            let applied = Rc::new(RefCell::new(Vec::new()));
            let resets = Rc::new(RefCell::new(0));
            let applied_cb = applied.clone();
            let resets_cb = resets.clone();
            let panel = PanelController::new(PanelConfig { catalog, defaults }, registry.clone(), root)
                .on_apply(move |draft| applied_cb.borrow_mut().push(draft))
                .on_reset(move || *resets_cb.borrow_mut() += 1);
            Self {
                registry,
                panel,
                applied,
                resets,
            }
        }

        /// Route an interaction the way the main window does.
        fn interact(&mut self, interaction: Interaction) {
            for msg in self.registry.dispatch(&interaction) {
                self.panel.update(msg);
            }
        }

        fn change(&mut self, key: FieldKey, value: &str) -> UpdateOutcome {
            self.panel.update(PanelMessage::FieldChanged(FieldUpdate::new(key, value)))
        }
    }

    fn bare_panel() -> PanelController {
        let catalog = sample_catalog();
        let defaults = sample_defaults(&catalog);
        PanelController::new(PanelConfig { catalog, defaults }, ListenerRegistry::new(), RootRegion::new())
    }

    #[test]
    fn test_panel_starts_closed_with_defaults() {
        let h = Harness::new();
        assert_eq!(h.panel.visibility(), Visibility::Closed);
        assert_eq!(h.panel.draft(), h.panel.defaults());
        assert!(!h.panel.detector_active());
    }

    #[test]
    fn test_toggle_alternates() {
        let mut h = Harness::new();
        assert_eq!(h.panel.toggle(), Visibility::Open);
        assert!(h.panel.detector_active());
        assert_eq!(h.panel.toggle(), Visibility::Closed);
        assert!(!h.panel.detector_active());
        assert_eq!(h.panel.toggle(), Visibility::Open);
    }

    #[test]
    fn test_walkthrough() {
        let mut h = Harness::new();

        h.panel.update(PanelMessage::ToggleActivated);
        assert!(h.panel.is_open());

        assert!(matches!(h.change(FieldKey::FontColor, "green"), UpdateOutcome::DraftChanged));
        assert_eq!(h.panel.draft().value(FieldKey::FontColor), "green");
        assert_eq!(h.panel.draft().value(FieldKey::FontFamily), "sans");

        h.panel.update(PanelMessage::Apply);
        {
            let applied = h.applied.borrow();
            assert_eq!(applied.len(), 1);
            let sent = &applied[0];
            assert_eq!(sent.value(FieldKey::FontFamily), "sans");
            assert_eq!(sent.value(FieldKey::FontSize), "M");
            assert_eq!(sent.value(FieldKey::FontColor), "green");
            assert_eq!(sent.value(FieldKey::BackgroundColor), "white");
            assert_eq!(sent.value(FieldKey::ContentWidth), "fixed");
        }
        assert!(h.panel.is_open());

        h.interact(Interaction::Pointer(Point::new(800, 100)));
        assert_eq!(h.panel.visibility(), Visibility::Closed);

        h.panel.update(PanelMessage::ToggleActivated);
        h.panel.update(PanelMessage::Reset);
        assert_eq!(h.panel.draft(), h.panel.defaults());
        assert_eq!(*h.resets.borrow(), 1);
        assert!(h.panel.is_open());
    }

    #[test]
    fn test_applied_snapshot_is_detached_from_draft() {
        let mut h = Harness::new();
        h.panel.update(PanelMessage::Apply);
        h.change(FieldKey::FontSize, "L");
        assert_eq!(h.applied.borrow()[0].value(FieldKey::FontSize), "M");
        assert_eq!(h.panel.draft().value(FieldKey::FontSize), "L");
    }

    #[test]
    fn test_apply_prevents_default_and_keeps_visibility() {
        let mut h = Harness::new();
        let mut event = FormEvent::new();
        h.panel.apply(&mut event);
        assert!(event.default_prevented());
        assert_eq!(h.panel.visibility(), Visibility::Closed);
    }

    #[test]
    fn test_apply_and_reset_without_callbacks() {
        let mut panel = bare_panel();
        panel.change_field(&FieldUpdate::new(FieldKey::ContentWidth, "fluid")).unwrap();

        let mut event = FormEvent::new();
        panel.apply(&mut event);
        assert!(event.default_prevented());
        assert_eq!(panel.draft().value(FieldKey::ContentWidth), "fluid");

        let mut event = FormEvent::new();
        panel.reset(&mut event);
        assert!(event.default_prevented());
        assert_eq!(panel.draft(), panel.defaults());
    }

    #[test]
    fn test_reset_runs_callback_and_restores_draft() {
        let catalog = sample_catalog();
        let defaults = sample_defaults(&catalog);
        let seen = Rc::new(RefCell::new(None));
        let seen_cb = seen.clone();
        let mut panel = PanelController::new(
            PanelConfig { catalog, defaults },
            ListenerRegistry::new(),
            RootRegion::new(),
        );
        panel.change_field(&FieldUpdate::new(FieldKey::FontSize, "S")).unwrap();
        let mut panel = panel.on_reset(move || *seen_cb.borrow_mut() = Some(()));
        panel.update(PanelMessage::Reset);
        assert!(seen.borrow().is_some());
        assert_eq!(panel.draft().value(FieldKey::FontSize), "M");
    }

    #[test]
    fn test_reset_keeps_visibility() {
        let mut h = Harness::new();
        h.panel.update(PanelMessage::Reset);
        assert_eq!(h.panel.visibility(), Visibility::Closed);
        h.panel.toggle();
        h.panel.update(PanelMessage::Reset);
        assert_eq!(h.panel.visibility(), Visibility::Open);
    }

    #[test]
    fn test_closed_panel_ignores_all_interactions() {
        let mut h = Harness::new();
        for interaction in [
            Interaction::Pointer(Point::new(900, 900)),
            Interaction::Pointer(Point::new(10, 10)),
            Interaction::Key(KeyPress::Escape),
            Interaction::Key(KeyPress::Other),
        ] {
            h.interact(interaction);
            assert_eq!(h.panel.visibility(), Visibility::Closed);
        }
        assert!(matches!(h.panel.update(PanelMessage::Dismiss), UpdateOutcome::Ignored));
    }

    #[test]
    fn test_press_inside_keeps_panel_open() {
        let mut h = Harness::new();
        h.panel.toggle();
        h.interact(Interaction::Pointer(Point::new(150, 300)));
        assert!(h.panel.is_open());
    }

    #[test]
    fn test_outside_press_closes_exactly_once() {
        let mut h = Harness::new();
        h.panel.toggle();
        let msgs = h.registry.dispatch(&Interaction::Pointer(Point::new(400, 10)));
        assert_eq!(msgs, vec![PanelMessage::Dismiss]);
        for msg in msgs {
            h.panel.update(msg);
        }
        assert!(!h.panel.is_open());
        // Listeners went away with the open state
        assert!(h.registry.dispatch(&Interaction::Pointer(Point::new(400, 10))).is_empty());
    }

    #[test]
    fn test_escape_closes_open_panel() {
        let mut h = Harness::new();
        h.panel.toggle();
        h.interact(Interaction::Key(KeyPress::Escape));
        assert_eq!(h.panel.visibility(), Visibility::Closed);
    }

    #[test]
    fn test_unmounted_region_does_not_dismiss() {
        let mut h = Harness::new();
        h.panel.root().detach();
        h.panel.toggle();
        h.interact(Interaction::Pointer(Point::new(5000, 5000)));
        assert!(h.panel.is_open());
    }

    #[test]
    fn test_rejected_report_leaves_draft_untouched() {
        let mut h = Harness::new();
        let before = h.panel.draft().clone();

        let outcome = h.panel.update(PanelMessage::FieldReported(RawFieldReport::new(FieldKey::FontSize, -1)));
        assert!(matches!(outcome, UpdateOutcome::Rejected(PanelError::MalformedUpdate { .. })));

        let outcome = h.change(FieldKey::FontFamily, "wingdings");
        assert!(matches!(outcome, UpdateOutcome::Rejected(PanelError::UnknownOption { .. })));

        assert_eq!(h.panel.draft(), &before);
    }

    #[test]
    fn test_field_report_merges_by_index() {
        let mut h = Harness::new();
        let outcome = h.panel.update(PanelMessage::FieldReported(RawFieldReport::new(FieldKey::BackgroundColor, 1)));
        assert!(matches!(outcome, UpdateOutcome::DraftChanged));
        assert_eq!(h.panel.draft().value(FieldKey::BackgroundColor), "gray");
    }

    #[test]
    fn test_dropping_open_panel_releases_listeners() {
        let mut h = Harness::new();
        h.panel.toggle();
        assert_eq!(h.registry.count(ListenerClass::Pointer), 1);
        let Harness { registry, panel, .. } = h;
        drop(panel);
        assert_eq!(registry.count(ListenerClass::Pointer), 0);
        assert_eq!(registry.count(ListenerClass::Key), 0);
    }

    proptest! {
        #[test]
        fn prop_toggle_parity(n in 0usize..64) {
            let mut panel = bare_panel();
            for _ in 0..n {
                panel.toggle();
            }
            prop_assert_eq!(panel.is_open(), n % 2 == 1);
            prop_assert_eq!(panel.detector_active(), n % 2 == 1);
        }

        #[test]
        fn prop_reset_restores_defaults(indices in proptest::collection::vec((0usize..5, 0i32..3), 0..20), open in any::<bool>()) {
            let mut panel = bare_panel();
            if open {
                panel.toggle();
            }
            for (k, i) in indices {
                // Out-of-range indices are rejected; the rest merge
                let _ = panel.report_field(RawFieldReport::new(FieldKey::ALL[k], i));
            }
            panel.reset(&mut FormEvent::new());
            prop_assert_eq!(panel.draft(), panel.defaults());
            prop_assert_eq!(panel.is_open(), open);
        }
    }
}
