//! Structured event emission.

/// A named event with ordered key/value attributes.
///
/// # Examples
///
/// ```
/// use ammswap::traits::Event;
///
/// let ev = Event::new("swap").attr("recipient", "bob").attr("bought", "1okt");
/// assert_eq!(ev.get("recipient"), Some("bob"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Event type, e.g. `"add_liquidity"`.
    pub name: String,
    /// Attributes in emission order.
    pub attributes: Vec<(String, String)>,
}

impl Event {
    /// Starts an event with no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Appends an attribute.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.push((key.into(), value.to_string()));
        self
    }

    /// First value recorded under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Receiver of events emitted by successful operations.
pub trait EventSink {
    /// Records `event`.
    fn emit(&mut self, event: Event);
}
