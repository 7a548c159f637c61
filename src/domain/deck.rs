use super::{GestureEvent, ReleaseDecision, SwipeDirection, SwipeMetrics, Vector2};
use crate::animation::{AnimatedPosition, AnimationEvent, SpringState, Transition};
use crate::config::DeckConfig;
use crate::error::Result;
use log::{debug, trace};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

const STACK_SETTLE_THRESHOLD: f32 = 0.001;

type SwipeCallback<T> = Box<dyn FnMut(&T)>;

/// A committed swipe waiting for its off-screen animation to finish.
///
/// Holds its own handle on the deck so the reported item is fixed at
/// commit time even if the caller replaces the data mid-flight.
struct PendingSwipe<T> {
    direction: SwipeDirection,
    deck: Arc<[T]>,
    index: usize,
}

/// Spring that lifts the stack one slot after the top card leaves
#[derive(Debug)]
struct StackSettle {
    spring: SpringState,
    elapsed_secs: f32,
}

impl StackSettle {
    fn new() -> Self {
        Self {
            spring: SpringState::new(),
            elapsed_secs: 0.0,
        }
    }

    /// Returns true once settled
    fn tick(&mut self, dt: Duration, config: &crate::animation::SpringConfig) -> bool {
        self.elapsed_secs += dt.as_secs_f32();
        self.spring.step(self.elapsed_secs, config);
        self.spring.is_settled(STACK_SETTLE_THRESHOLD)
    }
}

/// One visible card in a rendered frame
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayer<V> {
    /// Position of the item in the deck
    pub index: usize,
    /// Distance from the top card (0 = top)
    pub depth: usize,
    /// Paint order; higher values are drawn later and occlude lower ones
    pub draw_order: usize,
    pub offset: Vector2,
    pub rotation_deg: f32,
    /// Only the top card receives gestures
    pub interactive: bool,
    pub content: V,
}

/// Output of [`CardDeck::render`]
#[derive(Debug, Clone, PartialEq)]
pub enum DeckFrame<V> {
    /// Every card has been swiped
    Empty(V),
    /// Visible cards ordered back-to-front
    Stack(Vec<CardLayer<V>>),
}

impl<V> DeckFrame<V> {
    pub fn is_empty(&self) -> bool {
        matches!(self, DeckFrame::Empty(_))
    }

    pub fn layers(&self) -> &[CardLayer<V>] {
        match self {
            DeckFrame::Empty(_) => &[],
            DeckFrame::Stack(layers) => layers,
        }
    }

    pub fn top(&self) -> Option<&CardLayer<V>> {
        self.layers().last()
    }
}

/// A stacked, swipeable card deck.
///
/// Position is continuous state updated every gesture frame; the cursor is
/// discrete state that only moves when a swipe-out completes. Every method
/// takes `&mut self` except [`render`](Self::render), so a render always
/// sees a consistent snapshot of both.
pub struct CardDeck<T> {
    data: Arc<[T]>,
    index: usize,
    position: AnimatedPosition,
    metrics: SwipeMetrics,
    config: DeckConfig,
    pending: Option<PendingSwipe<T>>,
    ignoring_gesture: bool,
    stack_settle: Option<StackSettle>,
    on_swipe_right: SwipeCallback<T>,
    on_swipe_left: SwipeCallback<T>,
}

impl<T> CardDeck<T> {
    pub fn new(data: impl Into<Arc<[T]>>, viewport_width: f32) -> Result<Self> {
        Self::with_config(data, viewport_width, DeckConfig::default())
    }

    pub fn with_config(
        data: impl Into<Arc<[T]>>,
        viewport_width: f32,
        config: DeckConfig,
    ) -> Result<Self> {
        config.validate()?;
        let metrics = SwipeMetrics::from_viewport(viewport_width, &config)?;

        Ok(Self {
            data: data.into(),
            index: 0,
            position: AnimatedPosition::default(),
            metrics,
            config,
            pending: None,
            ignoring_gesture: false,
            stack_settle: None,
            on_swipe_right: Box::new(|_: &T| {}),
            on_swipe_left: Box::new(|_: &T| {}),
        })
    }

    /// Called with the dismissed item once a right swipe has left the screen
    pub fn on_swipe_right(mut self, callback: impl FnMut(&T) + 'static) -> Self {
        self.on_swipe_right = Box::new(callback);
        self
    }

    /// Called with the dismissed item once a left swipe has left the screen
    pub fn on_swipe_left(mut self, callback: impl FnMut(&T) + 'static) -> Self {
        self.on_swipe_left = Box::new(callback);
        self
    }

    pub fn data(&self) -> &Arc<[T]> {
        &self.data
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.index)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True when no card remains and the empty view is shown
    pub fn is_exhausted(&self) -> bool {
        self.index >= self.data.len()
    }

    pub fn current_item(&self) -> Option<&T> {
        self.data.get(self.index)
    }

    pub fn position(&self) -> Vector2 {
        self.position.value()
    }

    pub fn metrics(&self) -> &SwipeMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// A committed card is still travelling off-screen
    pub fn is_swiping(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.position.is_animating() || self.stack_settle.is_some()
    }

    /// What releasing the top card at its current offset would do
    pub fn preview_decision(&self) -> ReleaseDecision {
        self.metrics.classify_release(self.position.value().x)
    }

    pub fn set_viewport_width(&mut self, viewport_width: f32) -> Result<()> {
        if viewport_width == self.metrics.viewport_width {
            return Ok(());
        }
        self.metrics = SwipeMetrics::from_viewport(viewport_width, &self.config)?;
        debug!(
            "viewport width {} -> swipe threshold {}",
            viewport_width, self.metrics.threshold
        );
        Ok(())
    }

    /// Replace the deck. A different allocation resets the cursor to 0 and,
    /// unless a swipe-out is running, the top card's position; passing the
    /// same `Arc` again changes nothing.
    pub fn set_data(&mut self, data: impl Into<Arc<[T]>>) {
        let data = data.into();
        if Arc::ptr_eq(&self.data, &data) {
            return;
        }

        debug!(
            "deck replaced ({} -> {} cards), cursor reset",
            self.data.len(),
            data.len()
        );
        self.data = data;
        self.index = 0;
        self.stack_settle = None;
        if self.pending.is_none() {
            self.position.set(Vector2::ZERO);
        }
    }

    fn accepts_gestures(&self) -> bool {
        self.pending.is_none() && !self.is_exhausted()
    }

    pub fn handle_gesture(&mut self, event: GestureEvent) -> Option<ReleaseDecision> {
        match event {
            GestureEvent::Start => {
                self.on_gesture_start();
                None
            }
            GestureEvent::Move { dx, dy } => {
                self.on_gesture_move(dx, dy);
                None
            }
            GestureEvent::Release { dx, dy } => self.on_gesture_release(dx, dy),
        }
    }

    /// A gesture that starts while the top card is leaving is ignored until
    /// its release.
    pub fn on_gesture_start(&mut self) {
        self.ignoring_gesture = !self.accepts_gestures();
        if self.ignoring_gesture {
            debug!("gesture ignored: no interactive top card");
        }
    }

    pub fn on_gesture_move(&mut self, dx: f32, dy: f32) {
        if self.ignoring_gesture || !self.accepts_gestures() {
            return;
        }
        trace!("drag ({}, {})", dx, dy);
        self.position.set(Vector2::new(dx, dy));
    }

    /// Commit or reset based on the final horizontal displacement.
    ///
    /// Returns `None` when the gesture was not accepted.
    pub fn on_gesture_release(&mut self, dx: f32, dy: f32) -> Option<ReleaseDecision> {
        let ignored = std::mem::take(&mut self.ignoring_gesture);
        if ignored || !self.accepts_gestures() {
            return None;
        }

        self.position.set(Vector2::new(dx, dy));
        let decision = self.metrics.classify_release(dx);
        match decision {
            ReleaseDecision::Commit(direction) => {
                self.commit_swipe(direction);
            }
            ReleaseDecision::Reset => self.reset_position(),
        }
        Some(decision)
    }

    /// Swipe the top card out without a gesture.
    ///
    /// Returns false when there is no top card or a swipe is already running.
    pub fn force_swipe(&mut self, direction: SwipeDirection) -> bool {
        self.commit_swipe(direction)
    }

    fn commit_swipe(&mut self, direction: SwipeDirection) -> bool {
        if !self.accepts_gestures() {
            return false;
        }

        self.pending = Some(PendingSwipe {
            direction,
            deck: Arc::clone(&self.data),
            index: self.index,
        });

        let target = self.metrics.off_screen_target(direction);
        self.position.animate_to(
            target,
            Transition::timing(self.config.swipe_out_duration_ms, self.config.swipe_easing),
        );
        debug!("commit {:?} swipe on card {}", direction, self.index);
        true
    }

    /// Spring the top card back to center. No-op while a swipe is running.
    pub fn reset_position(&mut self) {
        if self.pending.is_some() {
            return;
        }
        debug!("reset card {} from {:?}", self.index, self.position.value());
        self.position
            .animate_to(Vector2::ZERO, Transition::spring(self.config.reset_spring));
    }

    /// Advance animations by `dt`. Swipe completion runs here, after the
    /// off-screen animation reports it has finished.
    pub fn tick(&mut self, dt: Duration) {
        if let Some(settle) = self.stack_settle.as_mut() {
            if settle.tick(dt, &self.config.layout_spring) {
                self.stack_settle = None;
            }
        }

        if let Some(AnimationEvent::Finished) = self.position.tick(dt) {
            self.complete_swipe();
        }
    }

    fn complete_swipe(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        let item = &pending.deck[pending.index];
        match pending.direction {
            SwipeDirection::Right => (self.on_swipe_right)(item),
            SwipeDirection::Left => (self.on_swipe_left)(item),
        }
        self.position.set(Vector2::ZERO);

        if Arc::ptr_eq(&pending.deck, &self.data) {
            self.index += 1;
            debug!(
                "card {} swiped {:?}, {} remaining",
                pending.index,
                pending.direction,
                self.remaining()
            );
            if !self.is_exhausted() {
                self.stack_settle = Some(StackSettle::new());
            }
        } else {
            debug!(
                "card {} swiped {:?} after deck replacement, cursor stays at {}",
                pending.index, pending.direction, self.index
            );
        }
    }

    fn settle_progress(&self) -> f32 {
        self.stack_settle
            .as_ref()
            .map_or(1.0, |settle| settle.spring.position)
    }

    /// Produce the visible window `[index, len)` back-to-front, or the
    /// empty view once every card has been swiped.
    pub fn render<V>(
        &self,
        mut render_card: impl FnMut(&T) -> V,
        render_empty: impl FnOnce() -> V,
    ) -> DeckFrame<V> {
        if self.is_exhausted() {
            return DeckFrame::Empty(render_empty());
        }

        let lift = self.config.stack_offset * (1.0 - self.settle_progress());
        let position = self.position.value();
        let visible = &self.data[self.index..];

        let mut layers = Vec::with_capacity(visible.len());
        for (depth, item) in visible.iter().enumerate().rev() {
            let draw_order = layers.len();
            let (offset, rotation_deg) = if depth == 0 {
                (
                    Vector2::new(position.x, position.y + lift),
                    self.metrics.rotation_for(position.x),
                )
            } else {
                (
                    Vector2::new(0.0, self.config.stack_offset * depth as f32 + lift),
                    0.0,
                )
            };

            layers.push(CardLayer {
                index: self.index + depth,
                depth,
                draw_order,
                offset,
                rotation_deg,
                interactive: depth == 0,
                content: render_card(item),
            });
        }

        DeckFrame::Stack(layers)
    }
}

impl<T> fmt::Debug for CardDeck<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDeck")
            .field("len", &self.data.len())
            .field("index", &self.index)
            .field("position", &self.position.value())
            .field("swiping", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeckError;
    use std::cell::RefCell;
    use std::rc::Rc;

    const WIDTH: f32 = 400.0;
    const FRAME: Duration = Duration::from_millis(16);

    type Log = Rc<RefCell<Vec<(SwipeDirection, &'static str)>>>;

    fn recording_deck(items: &[&'static str]) -> (CardDeck<&'static str>, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let right = Rc::clone(&log);
        let left = Rc::clone(&log);
        let deck = CardDeck::new(items.to_vec(), WIDTH)
            .unwrap()
            .on_swipe_right(move |item| right.borrow_mut().push((SwipeDirection::Right, *item)))
            .on_swipe_left(move |item| left.borrow_mut().push((SwipeDirection::Left, *item)));
        (deck, log)
    }

    fn settle<T>(deck: &mut CardDeck<T>) {
        for _ in 0..1000 {
            if !deck.is_animating() {
                return;
            }
            deck.tick(FRAME);
        }
        panic!("deck did not settle");
    }

    fn render_names(deck: &CardDeck<&'static str>) -> DeckFrame<String> {
        deck.render(|item| item.to_string(), || "empty".to_string())
    }

    fn swipe(deck: &mut CardDeck<&'static str>, dx: f32) -> Option<ReleaseDecision> {
        deck.on_gesture_start();
        deck.on_gesture_move(dx / 2.0, 3.0);
        let decision = deck.on_gesture_release(dx, 3.0);
        settle(deck);
        decision
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn test_initial_state() {
            let (deck, log) = recording_deck(&["a", "b"]);
            assert_eq!(deck.index(), 0);
            assert_eq!(deck.len(), 2);
            assert_eq!(deck.remaining(), 2);
            assert_eq!(deck.position(), Vector2::ZERO);
            assert_eq!(deck.current_item(), Some(&"a"));
            assert!(!deck.is_animating());
            assert!(log.borrow().is_empty());
        }

        #[test]
        fn test_rejects_invalid_viewport() {
            let result = CardDeck::new(vec![1, 2, 3], 0.0);
            assert!(matches!(result, Err(DeckError::InvalidViewport(_))));
        }

        #[test]
        fn test_rejects_invalid_config() {
            let config = DeckConfig {
                swipe_threshold_ratio: -0.5,
                ..DeckConfig::default()
            };
            let result = CardDeck::with_config(vec![1], WIDTH, config);
            assert!(matches!(result, Err(DeckError::InvalidConfig(_))));
        }

        #[test]
        fn test_callbacks_default_to_noop() {
            let mut deck = CardDeck::new(vec!["a", "b"], WIDTH).unwrap();
            assert!(deck.force_swipe(SwipeDirection::Right));
            settle(&mut deck);
            assert_eq!(deck.index(), 1);
        }
    }

    mod gesture_tests {
        use super::*;

        #[test]
        fn test_move_sets_position() {
            let (mut deck, _) = recording_deck(&["a"]);
            deck.on_gesture_start();
            deck.on_gesture_move(42.0, -7.0);
            assert_eq!(deck.position(), Vector2::new(42.0, -7.0));
            deck.on_gesture_move(-3.0, 0.5);
            assert_eq!(deck.position(), Vector2::new(-3.0, 0.5));
        }

        #[test]
        fn test_handle_gesture_dispatch() {
            let (mut deck, _) = recording_deck(&["a"]);
            assert_eq!(deck.handle_gesture(GestureEvent::Start), None);
            assert_eq!(
                deck.handle_gesture(GestureEvent::Move { dx: 10.0, dy: 0.0 }),
                None
            );
            assert_eq!(deck.position(), Vector2::new(10.0, 0.0));
            assert_eq!(
                deck.handle_gesture(GestureEvent::Release { dx: 10.0, dy: 0.0 }),
                Some(ReleaseDecision::Reset)
            );
        }

        #[test]
        fn test_move_cancels_spring_back() {
            let (mut deck, _) = recording_deck(&["a"]);
            deck.on_gesture_release(50.0, 0.0);
            assert!(deck.is_animating());

            deck.on_gesture_start();
            deck.on_gesture_move(20.0, 0.0);
            assert!(!deck.is_animating());
            assert_eq!(deck.position(), Vector2::new(20.0, 0.0));
        }

        #[test]
        fn test_preview_decision_follows_position() {
            let (mut deck, _) = recording_deck(&["a"]);
            deck.on_gesture_move(150.0, 0.0);
            assert_eq!(
                deck.preview_decision(),
                ReleaseDecision::Commit(SwipeDirection::Right)
            );
            deck.on_gesture_move(-20.0, 0.0);
            assert_eq!(deck.preview_decision(), ReleaseDecision::Reset);
        }
    }

    mod release_tests {
        use super::*;

        #[test]
        fn test_right_swipe_scenario() {
            let (mut deck, log) = recording_deck(&["A", "B", "C"]);
            let decision = swipe(&mut deck, 0.3 * WIDTH);

            assert_eq!(decision, Some(ReleaseDecision::Commit(SwipeDirection::Right)));
            assert_eq!(*log.borrow(), vec![(SwipeDirection::Right, "A")]);
            assert_eq!(deck.index(), 1);
            assert_eq!(deck.position(), Vector2::ZERO);

            let frame = render_names(&deck);
            assert_eq!(frame.top().map(|l| l.content.as_str()), Some("B"));
        }

        #[test]
        fn test_left_swipe() {
            let (mut deck, log) = recording_deck(&["A", "B"]);
            let decision = swipe(&mut deck, -0.3 * WIDTH);

            assert_eq!(decision, Some(ReleaseDecision::Commit(SwipeDirection::Left)));
            assert_eq!(*log.borrow(), vec![(SwipeDirection::Left, "A")]);
            assert_eq!(deck.index(), 1);
        }

        #[test]
        fn test_below_threshold_resets() {
            let (mut deck, log) = recording_deck(&["A"]);
            deck.on_gesture_start();
            deck.on_gesture_move(0.1 * WIDTH, 12.0);
            let decision = deck.on_gesture_release(0.1 * WIDTH, 12.0);

            assert_eq!(decision, Some(ReleaseDecision::Reset));
            deck.tick(FRAME);
            let x = deck.position().x;
            assert!(x < 0.1 * WIDTH, "card should move back, x = {}", x);

            settle(&mut deck);
            assert!(log.borrow().is_empty());
            assert_eq!(deck.index(), 0);
            assert_eq!(deck.position(), Vector2::ZERO);
        }

        #[test]
        fn test_exact_threshold_resets() {
            let (mut deck, log) = recording_deck(&["A"]);
            let threshold = deck.metrics().threshold;

            assert_eq!(swipe(&mut deck, threshold), Some(ReleaseDecision::Reset));
            assert_eq!(swipe(&mut deck, -threshold), Some(ReleaseDecision::Reset));
            assert!(log.borrow().is_empty());
            assert_eq!(deck.index(), 0);
        }

        #[test]
        fn test_callback_fires_after_animation() {
            let (mut deck, log) = recording_deck(&["A", "B"]);
            deck.on_gesture_release(200.0, 0.0);

            deck.tick(Duration::from_millis(200));
            assert!(log.borrow().is_empty());
            assert_eq!(deck.index(), 0);
            assert!(deck.position().x > 200.0);

            deck.tick(Duration::from_millis(60));
            assert_eq!(log.borrow().len(), 1);
            assert_eq!(deck.index(), 1);
            assert_eq!(deck.position(), Vector2::ZERO);

            settle(&mut deck);
            assert_eq!(log.borrow().len(), 1);
        }

        #[test]
        fn test_exhausting_the_deck() {
            let items = ["A", "B", "C", "D"];
            let (mut deck, log) = recording_deck(&items);
            for _ in 0..items.len() {
                swipe(&mut deck, WIDTH);
            }

            assert_eq!(deck.index(), items.len());
            assert!(deck.is_exhausted());
            assert_eq!(log.borrow().len(), items.len());

            let mut rendered = 0;
            let frame = deck.render(
                |_| {
                    rendered += 1;
                },
                || (),
            );
            assert!(frame.is_empty());
            assert!(frame.layers().is_empty());
            assert_eq!(rendered, 0);
        }

        #[test]
        fn test_no_swipe_on_empty_deck() {
            let mut deck: CardDeck<&str> = CardDeck::new(Vec::new(), WIDTH).unwrap();
            assert!(!deck.force_swipe(SwipeDirection::Right));
            assert_eq!(deck.on_gesture_release(1000.0, 0.0), None);
            assert_eq!(deck.index(), 0);
            assert!(!deck.is_animating());
        }
    }

    mod in_flight_tests {
        use super::*;

        #[test]
        fn test_gesture_during_swipe_out_is_ignored() {
            let (mut deck, log) = recording_deck(&["A", "B"]);
            assert!(deck.force_swipe(SwipeDirection::Left));
            deck.tick(FRAME);
            let mid_flight = deck.position();

            deck.on_gesture_start();
            deck.on_gesture_move(5.0, 5.0);
            assert_eq!(deck.position(), mid_flight);

            // Swipe-out finishes while the ignored gesture is still held
            settle(&mut deck);
            assert_eq!(deck.index(), 1);

            deck.on_gesture_move(300.0, 0.0);
            assert_eq!(deck.position(), Vector2::ZERO);
            assert_eq!(deck.on_gesture_release(300.0, 0.0), None);
            assert_eq!(deck.index(), 1);
            assert_eq!(*log.borrow(), vec![(SwipeDirection::Left, "A")]);
        }

        #[test]
        fn test_second_force_swipe_rejected() {
            let (mut deck, log) = recording_deck(&["A", "B", "C"]);
            assert!(deck.force_swipe(SwipeDirection::Right));
            assert!(!deck.force_swipe(SwipeDirection::Left));
            deck.reset_position();
            settle(&mut deck);

            assert_eq!(*log.borrow(), vec![(SwipeDirection::Right, "A")]);
            assert_eq!(deck.index(), 1);
        }

        #[test]
        fn test_replacement_during_swipe_reports_old_item() {
            let (mut deck, log) = recording_deck(&["A", "B"]);
            assert!(deck.force_swipe(SwipeDirection::Right));
            deck.tick(FRAME);

            deck.set_data(vec!["X", "Y", "Z"]);
            assert_eq!(deck.index(), 0);

            settle(&mut deck);
            assert_eq!(*log.borrow(), vec![(SwipeDirection::Right, "A")]);
            assert_eq!(deck.index(), 0);
            assert_eq!(deck.current_item(), Some(&"X"));
            assert_eq!(deck.position(), Vector2::ZERO);
        }
    }

    mod data_tests {
        use super::*;

        #[test]
        fn test_replacement_resets_cursor() {
            let (mut deck, _) = recording_deck(&["A", "B", "C"]);
            swipe(&mut deck, WIDTH);
            swipe(&mut deck, WIDTH);
            assert_eq!(deck.index(), 2);

            deck.set_data(vec!["A", "B", "C"]);
            assert_eq!(deck.index(), 0);
            assert_eq!(deck.current_item(), Some(&"A"));
        }

        #[test]
        fn test_replacement_after_exhaustion() {
            let (mut deck, _) = recording_deck(&["A"]);
            swipe(&mut deck, WIDTH);
            assert!(deck.is_exhausted());

            deck.set_data(vec!["B"]);
            assert!(!deck.is_exhausted());
            let frame = render_names(&deck);
            assert_eq!(frame.top().map(|l| l.content.as_str()), Some("B"));
        }

        #[test]
        fn test_replacement_drops_held_drag() {
            let (mut deck, log) = recording_deck(&["A", "B"]);
            deck.on_gesture_start();
            deck.on_gesture_move(60.0, 8.0);
            assert_eq!(deck.position(), Vector2::new(60.0, 8.0));

            deck.set_data(vec!["C", "D"]);
            assert_eq!(deck.position(), Vector2::ZERO);
            assert!(!deck.is_animating());
            assert!(log.borrow().is_empty());
        }

        #[test]
        fn test_replacement_cancels_spring_back() {
            let (mut deck, _) = recording_deck(&["A", "B"]);
            deck.on_gesture_start();
            let decision = deck.on_gesture_release(WIDTH * 0.2, 0.0);
            assert_eq!(decision, Some(ReleaseDecision::Reset));
            deck.tick(FRAME);
            assert!(deck.is_animating());

            deck.set_data(vec!["C"]);
            assert_eq!(deck.position(), Vector2::ZERO);
            assert!(!deck.is_animating());
            assert_eq!(deck.current_item(), Some(&"C"));
        }

        #[test]
        fn test_same_identity_keeps_cursor() {
            let (mut deck, _) = recording_deck(&["A", "B", "C"]);
            swipe(&mut deck, WIDTH);
            let same = Arc::clone(deck.data());

            deck.set_data(same);
            assert_eq!(deck.index(), 1);
        }

        #[test]
        fn test_viewport_change_moves_threshold() {
            let (mut deck, _) = recording_deck(&["A"]);
            deck.set_viewport_width(800.0).unwrap();
            assert_eq!(deck.metrics().threshold, 200.0);
            assert!(deck.set_viewport_width(-1.0).is_err());
            assert_eq!(deck.metrics().threshold, 200.0);
        }
    }

    mod render_tests {
        use super::*;

        #[test]
        fn test_layers_back_to_front() {
            let (deck, _) = recording_deck(&["A", "B", "C"]);
            let frame = render_names(&deck);
            let layers = frame.layers();

            let names: Vec<&str> = layers.iter().map(|l| l.content.as_str()).collect();
            assert_eq!(names, vec!["C", "B", "A"]);

            let depths: Vec<usize> = layers.iter().map(|l| l.depth).collect();
            assert_eq!(depths, vec![2, 1, 0]);

            let orders: Vec<usize> = layers.iter().map(|l| l.draw_order).collect();
            assert_eq!(orders, vec![0, 1, 2]);
        }

        #[test]
        fn test_stacked_cards_are_static_and_offset() {
            let (mut deck, _) = recording_deck(&["A", "B", "C"]);
            deck.on_gesture_move(120.0, 30.0);
            let frame = render_names(&deck);
            let layers = frame.layers();

            assert_eq!(layers[0].offset, Vector2::new(0.0, 20.0));
            assert_eq!(layers[1].offset, Vector2::new(0.0, 10.0));
            assert!(!layers[0].interactive);
            assert!(!layers[1].interactive);
            assert_eq!(layers[0].rotation_deg, 0.0);
        }

        #[test]
        fn test_top_card_follows_position() {
            let (mut deck, _) = recording_deck(&["A", "B"]);
            deck.on_gesture_move(300.0, -15.0);
            let frame = render_names(&deck);
            let top = frame.top().unwrap();

            assert!(top.interactive);
            assert_eq!(top.index, 0);
            assert_eq!(top.offset, Vector2::new(300.0, -15.0));
            assert_eq!(top.rotation_deg, 60.0);
        }

        #[test]
        fn test_swiped_cards_are_not_rendered() {
            let (mut deck, _) = recording_deck(&["A", "B", "C"]);
            swipe(&mut deck, -WIDTH);

            let mut calls = Vec::new();
            let frame = deck.render(
                |item| {
                    calls.push(*item);
                    *item
                },
                || "empty",
            );
            assert_eq!(frame.layers().len(), 2);
            assert_eq!(calls, vec!["C", "B"]);
            assert_eq!(frame.layers()[1].index, 1);
        }

        #[test]
        fn test_empty_deck_renders_empty_view() {
            let deck: CardDeck<&'static str> = CardDeck::new(Vec::new(), WIDTH).unwrap();
            assert_eq!(render_names(&deck), DeckFrame::Empty("empty".to_string()));
        }

        #[test]
        fn test_stack_settles_after_advance() {
            let (mut deck, _) = recording_deck(&["A", "B", "C"]);
            assert!(deck.force_swipe(SwipeDirection::Right));
            for _ in 0..100 {
                if !deck.is_swiping() {
                    break;
                }
                deck.tick(FRAME);
            }
            assert_eq!(deck.index(), 1);

            // Cards start from their old slots, one step lower
            let frame = render_names(&deck);
            assert_eq!(frame.top().unwrap().offset, Vector2::new(0.0, 10.0));
            assert_eq!(frame.layers()[0].offset, Vector2::new(0.0, 20.0));

            settle(&mut deck);
            let frame = render_names(&deck);
            assert_eq!(frame.top().unwrap().offset, Vector2::ZERO);
            assert_eq!(frame.layers()[0].offset, Vector2::new(0.0, 10.0));
        }
    }
}
