use std::cell::RefCell;
use std::rc::Rc;

use super::listeners::{Interaction, KeyPress, ListenerClass, ListenerHandle, ListenerRegistry, Point, Rect};
use super::messages::PanelMessage;

/// Shared reference to the panel's on-screen region.
///
/// Unset until the panel has been laid out; the view attaches the bounds once
/// the window is shown and refreshes them before each press.
#[derive(Clone, Default)]
pub struct RootRegion {
    rects: Rc<RefCell<Option<Vec<Rect>>>>,
}

impl RootRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, rects: Vec<Rect>) {
        *self.rects.borrow_mut() = Some(rects);
    }

    pub fn detach(&self) {
        *self.rects.borrow_mut() = None;
    }

    pub fn is_attached(&self) -> bool {
        self.rects.borrow().is_some()
    }

    /// `None` while the region is not attached.
    pub fn contains(&self, p: Point) -> Option<bool> {
        self.rects
            .borrow()
            .as_ref()
            .map(|rects| rects.iter().any(|r| r.contains(p)))
    }
}

/// Both global listeners, held only while the detector is active.
struct DetectorGuard {
    _pointer: ListenerHandle,
    _key: ListenerHandle,
}

/// Requests dismissal when the user presses outside the root region or hits
/// Escape, but only while active.
pub struct OutsideClickDetector {
    registry: ListenerRegistry,
    root: RootRegion,
    guard: Option<DetectorGuard>,
}

impl OutsideClickDetector {
    pub fn new(registry: ListenerRegistry, root: RootRegion) -> Self {
        Self {
            registry,
            root,
            guard: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.guard.is_some()
    }

    pub fn root(&self) -> &RootRegion {
        &self.root
    }

    /// Install listeners on the inactive -> active edge, release them on the
    /// way back. Repeating the current state changes nothing.
    pub fn set_active(&mut self, active: bool) {
        match (active, self.guard.is_some()) {
            (true, false) => {
                self.guard = Some(self.acquire());
                tracing::debug!("outside-click detector armed");
            }
            (false, true) => {
                self.guard = None;
                tracing::debug!("outside-click detector released");
            }
            _ => {}
        }
    }

    fn acquire(&self) -> DetectorGuard {
        let root = self.root.clone();
        let pointer = self.registry.install(ListenerClass::Pointer, move |ev| {
            let Interaction::Pointer(p) = ev else {
                return None;
            };
            match root.contains(*p) {
                Some(false) => Some(PanelMessage::Dismiss),
                Some(true) => None,
                None => {
                    tracing::trace!("press ignored: panel region not attached");
                    None
                }
            }
        });
        let key = self.registry.install(ListenerClass::Key, |ev| {
            matches!(ev, Interaction::Key(KeyPress::Escape)).then_some(PanelMessage::Dismiss)
        });
        DetectorGuard {
            _pointer: pointer,
            _key: key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed() -> (ListenerRegistry, RootRegion, OutsideClickDetector) {
        let registry = ListenerRegistry::new();
        let root = RootRegion::new();
        root.attach(vec![Rect::new(0, 0, 100, 100)]);
        let mut detector = OutsideClickDetector::new(registry.clone(), root.clone());
        detector.set_active(true);
        (registry, root, detector)
    }

    fn press(x: i32, y: i32) -> Interaction {
        Interaction::Pointer(Point::new(x, y))
    }

    #[test]
    fn test_inactive_detector_holds_no_listeners() {
        let registry = ListenerRegistry::new();
        let detector = OutsideClickDetector::new(registry.clone(), RootRegion::new());
        assert!(!detector.is_active());
        assert_eq!(registry.count(ListenerClass::Pointer), 0);
        assert_eq!(registry.count(ListenerClass::Key), 0);
        assert!(registry.dispatch(&press(500, 500)).is_empty());
        assert!(registry.dispatch(&Interaction::Key(KeyPress::Escape)).is_empty());
    }

    #[test]
    fn test_press_outside_dismisses() {
        let (registry, _root, _detector) = armed();
        assert_eq!(registry.dispatch(&press(150, 20)), vec![PanelMessage::Dismiss]);
    }

    #[test]
    fn test_press_inside_is_ignored() {
        let (registry, _root, _detector) = armed();
        assert!(registry.dispatch(&press(0, 0)).is_empty());
        assert!(registry.dispatch(&press(99, 99)).is_empty());
    }

    #[test]
    fn test_escape_dismisses_regardless_of_position() {
        let (registry, _root, _detector) = armed();
        assert_eq!(
            registry.dispatch(&Interaction::Key(KeyPress::Escape)),
            vec![PanelMessage::Dismiss]
        );
        assert!(registry.dispatch(&Interaction::Key(KeyPress::Other)).is_empty());
    }

    #[test]
    fn test_unattached_region_never_dismisses_on_press() {
        let (registry, root, _detector) = armed();
        root.detach();
        assert!(registry.dispatch(&press(1000, 1000)).is_empty());
        // Escape does not need a region
        assert_eq!(
            registry.dispatch(&Interaction::Key(KeyPress::Escape)),
            vec![PanelMessage::Dismiss]
        );
    }

    #[test]
    fn test_region_made_of_several_rects() {
        let (registry, root, _detector) = armed();
        root.attach(vec![Rect::new(0, 0, 100, 100), Rect::new(200, 0, 20, 20)]);
        assert!(registry.dispatch(&press(210, 10)).is_empty());
        assert_eq!(registry.dispatch(&press(150, 10)), vec![PanelMessage::Dismiss]);
    }

    #[test]
    fn test_rapid_toggling_keeps_at_most_one_listener_per_class() {
        let (registry, _root, mut detector) = armed();
        for active in [true, true, false, true, false, false, true, true] {
            detector.set_active(active);
            let expected = usize::from(active);
            assert_eq!(registry.count(ListenerClass::Pointer), expected);
            assert_eq!(registry.count(ListenerClass::Key), expected);
        }
    }

    #[test]
    fn test_deactivation_stops_dismissal() {
        let (registry, _root, mut detector) = armed();
        detector.set_active(false);
        assert!(registry.dispatch(&press(500, 500)).is_empty());
        assert!(registry.dispatch(&Interaction::Key(KeyPress::Escape)).is_empty());
    }

    #[test]
    fn test_drop_releases_listeners() {
        let (registry, _root, detector) = armed();
        assert_eq!(registry.count(ListenerClass::Pointer), 1);
        drop(detector);
        assert_eq!(registry.count(ListenerClass::Pointer), 0);
        assert_eq!(registry.count(ListenerClass::Key), 0);
    }
}
