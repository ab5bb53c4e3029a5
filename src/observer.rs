//! Observer-pattern price watcher: a [`Product`] notifies subscribed
//! [`PriceObserver`]s on every price change and records the price trail in
//! an [`IntList`].
//!
//! Observers do not remove themselves mid-notification; they answer with a
//! [`Reaction`] and the product retains or drops them once the pass is over,
//! so the subscriber list is never mutated out from under a running pass.

use thiserror::Error;

use crate::list::IntList;

// =============================================================================
// Milestone 1: Observer contract
// =============================================================================

/// What a notified observer wants to happen to its subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Keep,
    Unsubscribe,
}

/// A party watching a product's price.
///
/// `on_price` runs once per price change, in subscription order.
pub trait PriceObserver {
    /// Short human-readable tag for reports.
    fn label(&self) -> &str;

    fn on_price(&mut self, price: f64) -> Reaction;
}

#[derive(Debug, Error, PartialEq)]
pub enum WatchError {
    #[error("price {price} is not a valid amount (must be finite and non-negative)")]
    InvalidPrice { price: f64 },

    #[error("no observer is subscribed under {0:?}")]
    UnknownObserver(ObserverId),
}

/// Handle for one subscription, returned by [`Product::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

// =============================================================================
// Milestone 2: Product, the observable
// =============================================================================

/// A product with a mutable price, a subscriber registry, and a whole-unit
/// price history kept in an [`IntList`].
pub struct Product {
    name: String,
    price: f64,
    observers: Vec<(ObserverId, Box<dyn PriceObserver>)>,
    history: IntList,
    next_id: u64,
}

impl Product {
    pub fn new(name: impl Into<String>, price: f64) -> Result<Self, WatchError> {
        check_price(price)?;
        Ok(Product {
            name: name.into(),
            price,
            observers: Vec::new(),
            history: IntList::new(),
            next_id: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Whole-unit price trail, oldest first. Only [`Product::change_price`]
    /// records entries; the opening price is not part of the history.
    pub fn history(&self) -> &IntList {
        &self.history
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn subscribe(&mut self, observer: Box<dyn PriceObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Removes a subscription and hands the observer back.
    pub fn unsubscribe(
        &mut self,
        id: ObserverId,
    ) -> Result<Box<dyn PriceObserver>, WatchError> {
        let idx = self
            .observers
            .iter()
            .position(|(oid, _)| *oid == id)
            .ok_or(WatchError::UnknownObserver(id))?;
        Ok(self.observers.remove(idx).1)
    }

    /// Updates the price, notifies subscribers in subscription order, then
    /// records the truncated price in the history (notification happens
    /// before the history grows).
    ///
    /// Observers answering [`Reaction::Unsubscribe`] are dropped from the
    /// registry and returned so the caller can inspect who left.
    pub fn change_price(
        &mut self,
        price: f64,
    ) -> Result<Vec<Box<dyn PriceObserver>>, WatchError> {
        check_price(price)?;
        self.price = price;

        let mut departing = Vec::new();
        for (id, mut observer) in std::mem::take(&mut self.observers) {
            match observer.on_price(price) {
                Reaction::Keep => self.observers.push((id, observer)),
                Reaction::Unsubscribe => departing.push(observer),
            }
        }

        self.history.push_back(price as i32);
        Ok(departing)
    }
}

fn check_price(price: f64) -> Result<(), WatchError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(WatchError::InvalidPrice { price })
    }
}

// =============================================================================
// Milestone 3: Threshold buyers
// =============================================================================

const WHOLESALER_THRESHOLD: f64 = 300.0;
const BUYER_THRESHOLD: f64 = 350.0;

/// Trade buyer: strikes once the price drops below 300, then stops watching.
#[derive(Debug, Default)]
pub struct Wholesaler {
    purchase: Option<f64>,
}

impl Wholesaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Price paid, if the wholesaler has bought.
    pub fn purchase(&self) -> Option<f64> {
        self.purchase
    }
}

impl PriceObserver for Wholesaler {
    fn label(&self) -> &str {
        "wholesaler"
    }

    fn on_price(&mut self, price: f64) -> Reaction {
        buy_below(WHOLESALER_THRESHOLD, price, &mut self.purchase)
    }
}

/// Retail buyer: strikes once the price drops below 350, then stops watching.
#[derive(Debug, Default)]
pub struct Buyer {
    purchase: Option<f64>,
}

impl Buyer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn purchase(&self) -> Option<f64> {
        self.purchase
    }
}

impl PriceObserver for Buyer {
    fn label(&self) -> &str {
        "buyer"
    }

    fn on_price(&mut self, price: f64) -> Reaction {
        buy_below(BUYER_THRESHOLD, price, &mut self.purchase)
    }
}

// One-shot purchase rule shared by both buyer kinds. The threshold is
// exclusive: a price exactly at the threshold is not a deal.
fn buy_below(threshold: f64, price: f64, purchase: &mut Option<f64>) -> Reaction {
    if price < threshold {
        *purchase = Some(price);
        Reaction::Unsubscribe
    } else {
        Reaction::Keep
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(&'static str, f64)>>>;

    /// Test observer that journals every notification into a shared log and
    /// optionally quits below a limit.
    struct Recorder {
        name: &'static str,
        log: Log,
        quit_below: Option<f64>,
    }

    impl PriceObserver for Recorder {
        fn label(&self) -> &str {
            self.name
        }

        fn on_price(&mut self, price: f64) -> Reaction {
            self.log.borrow_mut().push((self.name, price));
            match self.quit_below {
                Some(limit) if price < limit => Reaction::Unsubscribe,
                _ => Reaction::Keep,
            }
        }
    }

    fn recorder(name: &'static str, log: &Log, quit_below: Option<f64>) -> Box<Recorder> {
        Box::new(Recorder {
            name,
            log: Rc::clone(log),
            quit_below,
        })
    }

    fn product() -> Product {
        Product::new("gadget", 400.0).unwrap()
    }

    // Milestone 1 & 2 tests: notification mechanics

    #[test]
    fn subscribers_are_notified_in_subscription_order() {
        let log: Log = Log::default();
        let mut p = product();
        p.subscribe(recorder("first", &log, None));
        p.subscribe(recorder("second", &log, None));

        p.change_price(390.0).unwrap();
        p.change_price(380.0).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                ("first", 390.0),
                ("second", 390.0),
                ("first", 380.0),
                ("second", 380.0),
            ]
        );
    }

    #[test]
    fn unsubscribe_reaction_stops_future_notifications() {
        let log: Log = Log::default();
        let mut p = product();
        p.subscribe(recorder("flaky", &log, Some(385.0)));
        p.subscribe(recorder("steady", &log, None));

        p.change_price(380.0).unwrap();
        p.change_price(370.0).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![("flaky", 380.0), ("steady", 380.0), ("steady", 370.0)]
        );
        assert_eq!(p.observer_count(), 1);
    }

    #[test]
    fn change_price_returns_the_departing_observers() {
        let log: Log = Log::default();
        let mut p = product();
        p.subscribe(recorder("quitter", &log, Some(500.0)));
        p.subscribe(recorder("stayer", &log, None));

        let departed = p.change_price(390.0).unwrap();
        assert_eq!(departed.len(), 1);
        assert_eq!(departed[0].label(), "quitter");
    }

    #[test]
    fn unsubscribe_by_id_hands_the_observer_back() {
        let mut p = product();
        let id = p.subscribe(Box::new(Wholesaler::new()));
        let observer = p.unsubscribe(id).unwrap();
        assert_eq!(observer.label(), "wholesaler");
        assert_eq!(p.observer_count(), 0);

        assert!(matches!(
            p.unsubscribe(id),
            Err(WatchError::UnknownObserver(missing)) if missing == id
        ));
    }

    #[test]
    fn history_records_truncated_prices_after_notification() {
        let mut p = product();
        p.change_price(320.5).unwrap();
        p.change_price(280.0).unwrap();

        assert_eq!(p.history().len(), 2);
        assert_eq!(p.history().iter().copied().collect::<Vec<_>>(), vec![320, 280]);
    }

    #[test]
    fn invalid_prices_are_rejected_without_side_effects() {
        assert!(Product::new("gadget", f64::NAN).is_err());

        let mut p = product();
        assert!(p.change_price(-1.0).is_err());
        assert!(p.change_price(f64::INFINITY).is_err());
        assert_eq!(p.price(), 400.0);
        assert!(p.history().is_empty());
    }

    // Milestone 3 tests: threshold buyers

    #[test]
    fn wholesaler_threshold_is_exclusive() {
        let mut w = Wholesaler::new();
        assert_eq!(w.on_price(300.0), Reaction::Keep);
        assert_eq!(w.purchase(), None);
        assert_eq!(w.on_price(299.5), Reaction::Unsubscribe);
        assert_eq!(w.purchase(), Some(299.5));
    }

    #[test]
    fn storefront_sequence_plays_out_like_the_demo() {
        // Opens at 400; the buyer (350) strikes at 320, the wholesaler (300)
        // holds out until 280.
        let mut p = product();
        p.subscribe(Box::new(Wholesaler::new()));
        p.subscribe(Box::new(Buyer::new()));

        let departed = p.change_price(320.0).unwrap();
        assert_eq!(departed.len(), 1);
        assert_eq!(departed[0].label(), "buyer");
        assert_eq!(p.observer_count(), 1);

        let departed = p.change_price(280.0).unwrap();
        assert_eq!(departed.len(), 1);
        assert_eq!(departed[0].label(), "wholesaler");
        assert_eq!(p.observer_count(), 0);

        assert_eq!(p.history().iter().copied().collect::<Vec<_>>(), vec![320, 280]);
    }
}
