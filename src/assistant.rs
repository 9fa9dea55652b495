//! Rule-based guest assistant.
//!
//! Dispatch is a prioritized list of (keyword set, responder) rules
//! evaluated in order against the lowercased message: the first rule with
//! any matching keyword wins, so rule order is the priority order. All
//! hotel knowledge comes from an injected [`KnowledgeBase`]; nothing here
//! hardcodes property data.

use crate::config::knowledge::KnowledgeBase;
use std::fmt::Write as _;

/// How many nearby places of each category a response lists.
const NEARBY_ATTRACTIONS_SHOWN: usize = 4;
const NEARBY_DINING_SHOWN: usize = 3;
const NEARBY_SHOPPING_SHOWN: usize = 2;

/// One dispatch rule: a keyword set and the responder it triggers.
pub struct Rule {
    keywords: &'static [&'static str],
    respond: fn(&KnowledgeBase) -> String,
}

impl Rule {
    /// Creates a rule matching any of `keywords` (already lowercase).
    #[must_use]
    pub const fn new(keywords: &'static [&'static str], respond: fn(&KnowledgeBase) -> String) -> Self {
        Self { keywords, respond }
    }

    fn matches(&self, lowercased_message: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowercased_message.contains(keyword))
    }
}

/// A configured assistant: knowledge plus an ordered rule list.
pub struct Assistant {
    knowledge: KnowledgeBase,
    rules: Vec<Rule>,
}

impl Assistant {
    /// Creates an assistant with a caller-supplied rule list. Rules are
    /// evaluated in the given order; first match wins.
    #[must_use]
    pub fn new(knowledge: KnowledgeBase, rules: Vec<Rule>) -> Self {
        Self { knowledge, rules }
    }

    /// Creates an assistant with the default rule order: room catalogue,
    /// pricing, nearby places, booking guidance, payment guidance.
    #[must_use]
    pub fn with_default_rules(knowledge: KnowledgeBase) -> Self {
        Self::new(knowledge, default_rules())
    }

    /// Answers a guest message, or `None` when no rule matches and the
    /// caller should fall back to another channel.
    #[must_use]
    pub fn reply(&self, message: &str) -> Option<String> {
        let lowercased = message.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowercased))
            .map(|rule| (rule.respond)(&self.knowledge))
    }
}

/// The default rule list. Order matters: "room price" should hit the
/// catalogue rule, not the pricing rule, because the catalogue already
/// carries prices.
#[must_use]
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new(&["hotel", "room", "list"], respond_rooms),
        Rule::new(&["price", "cost", "fare"], respond_pricing),
        Rule::new(&["attraction", "place", "visit"], respond_nearby),
        Rule::new(&["book", "booking", "reserve"], respond_booking),
        Rule::new(&["payment", "wallet", "pay"], respond_payment),
    ]
}

fn respond_rooms(knowledge: &KnowledgeBase) -> String {
    let mut response = format!("{} - available rooms:\n\n", knowledge.hotel_name);
    for room in &knowledge.rooms {
        let _ = writeln!(response, "{} - {}/night", room.label, room.price);
        let _ = writeln!(response, "  {}", room.description);
    }
    response.push_str("\nContact us to book or get more information!");
    response
}

fn respond_pricing(knowledge: &KnowledgeBase) -> String {
    let mut response = format!("{} - pricing:\n\n", knowledge.hotel_name);
    for room in &knowledge.rooms {
        let _ = writeln!(response, "{}: {}/night", room.label, room.price);
    }
    response
}

fn respond_nearby(knowledge: &KnowledgeBase) -> String {
    let mut response = String::from("Nearby attractions:\n");
    for place in knowledge.attractions.iter().take(NEARBY_ATTRACTIONS_SHOWN) {
        let _ = writeln!(response, "- {place}");
    }
    response.push_str("\nDining:\n");
    for place in knowledge.dining.iter().take(NEARBY_DINING_SHOWN) {
        let _ = writeln!(response, "- {place}");
    }
    response.push_str("\nShopping:\n");
    for place in knowledge.shopping.iter().take(NEARBY_SHOPPING_SHOWN) {
        let _ = writeln!(response, "- {place}");
    }
    response
}

fn respond_booking(knowledge: &KnowledgeBase) -> String {
    knowledge.booking_help.clone()
}

fn respond_payment(knowledge: &KnowledgeBase) -> String {
    knowledge.payment_help.clone()
}
