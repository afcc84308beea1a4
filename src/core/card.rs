//! Card record and card network detection

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use uuid::Uuid;

/// Card network, inferred from the leading digits (IIN) of the number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Visa,
    Mastercard,
}

impl CardType {
    /// Display label, also used as the sort key
    pub fn label(&self) -> &'static str {
        match self {
            CardType::Visa => "Visa",
            CardType::Mastercard => "Mastercard",
        }
    }

    /// Card number lengths accepted for this network
    pub fn valid_lengths(&self) -> &'static [usize] {
        match self {
            CardType::Visa => &[13, 16],
            CardType::Mastercard => &[16],
        }
    }

    /// Infer the network from a (possibly partial) card number
    pub fn detect(number: &str) -> Option<CardType> {
        static MASTERCARD_IIN: OnceLock<Regex> = OnceLock::new();
        let mastercard = MASTERCARD_IIN.get_or_init(|| {
            // 51-55 and 2221-2720
            Regex::new(r"^(5[1-5]|2(22[1-9]|2[3-9]|[3-6]|7[0-1]|720))").unwrap()
        });

        if number.starts_with('4') {
            Some(CardType::Visa)
        } else if mastercard.is_match(number) {
            Some(CardType::Mastercard)
        } else {
            None
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CardType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "visa" => Ok(CardType::Visa),
            "mastercard" => Ok(CardType::Mastercard),
            other => Err(format!("unknown card type '{}'", other)),
        }
    }
}

/// A stored card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Assigned by the store on insertion
    pub id: Uuid,
    pub number: String,
    pub holder: String,
    pub cvv: String,
    pub exp_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub card_type: Option<CardType>,
}

impl Card {
    /// Number with digits 5 to 12 hidden, e.g. `4111 XXXX XXXX 1111`
    pub fn masked_number(&self) -> String {
        mask_number(&self.number)
    }

    /// Label shown in lists, `--` when the card has no name
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "--",
        }
    }

    /// Type label, empty for an unrecognized network
    pub fn type_label(&self) -> &'static str {
        self.card_type.map(|t| t.label()).unwrap_or("")
    }
}

/// A card as submitted, before the store assigns its id
///
/// There is no type field: the stored type is always detected from `number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCard {
    pub number: String,
    pub holder: String,
    pub cvv: String,
    pub exp_date: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl NewCard {
    pub(crate) fn into_card(self, id: Uuid) -> Card {
        Card {
            id,
            card_type: CardType::detect(&self.number),
            number: self.number,
            holder: self.holder,
            cvv: self.cvv,
            exp_date: self.exp_date,
            name: self.name.filter(|n| !n.is_empty()),
        }
    }
}

/// Hide digits 5 to 12 of a card number
pub fn mask_number(number: &str) -> String {
    let head: String = number.chars().take(4).collect();
    let tail: String = number.chars().skip(12).collect();
    format!("{} XXXX XXXX {}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_visa() {
        assert_eq!(CardType::detect("4111111111111111"), Some(CardType::Visa));
        assert_eq!(CardType::detect("4"), Some(CardType::Visa));
    }

    #[test]
    fn test_detect_mastercard_ranges() {
        assert_eq!(
            CardType::detect("5105105105105100"),
            Some(CardType::Mastercard)
        );
        for prefix in ["51", "55", "2221", "2229", "2230", "2300", "2699", "2700", "2719", "2720"] {
            assert_eq!(
                CardType::detect(prefix),
                Some(CardType::Mastercard),
                "prefix {}",
                prefix
            );
        }
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(CardType::detect("6011111111111117"), None);
        assert_eq!(CardType::detect("50"), None);
        assert_eq!(CardType::detect("56"), None);
        assert_eq!(CardType::detect("2220"), None);
        assert_eq!(CardType::detect("2721"), None);
        assert_eq!(CardType::detect(""), None);
    }

    #[test]
    fn test_card_type_from_str_is_case_insensitive() {
        assert_eq!("visa".parse::<CardType>(), Ok(CardType::Visa));
        assert_eq!("Mastercard".parse::<CardType>(), Ok(CardType::Mastercard));
        assert!("amex".parse::<CardType>().is_err());
    }

    #[test]
    fn test_masked_number() {
        assert_eq!(mask_number("4111111111111111"), "4111 XXXX XXXX 1111");
        assert_eq!(mask_number("4222222222222"), "4222 XXXX XXXX 2");
    }

    #[test]
    fn test_serialized_type_label() {
        let card = NewCard {
            number: "5105105105105100".to_string(),
            holder: "Jane Doe".to_string(),
            cvv: "123".to_string(),
            exp_date: "01/30".to_string(),
            name: Some(String::new()),
        }
        .into_card(Uuid::nil());

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["type"], "Mastercard");
        assert!(json.get("name").is_none());
        assert_eq!(card.display_name(), "--");
    }

    #[test]
    fn test_type_is_detected_from_number() {
        let card = |number: &str| {
            NewCard {
                number: number.to_string(),
                holder: "Jane Doe".to_string(),
                cvv: "123".to_string(),
                exp_date: "01/30".to_string(),
                name: None,
            }
            .into_card(Uuid::nil())
        };

        assert_eq!(card("4111111111111111").card_type, Some(CardType::Visa));
        assert_eq!(card("2720990000000007").card_type, Some(CardType::Mastercard));
        assert_eq!(card("6011111111111117").card_type, None);
    }

    #[test]
    fn test_submitted_type_is_ignored() {
        let new_card: NewCard = serde_json::from_value(serde_json::json!({
            "number": "4111111111111111",
            "holder": "Jane Doe",
            "cvv": "123",
            "exp_date": "01/30",
            "type": "Mastercard",
        }))
        .unwrap();

        let card = new_card.into_card(Uuid::nil());
        assert_eq!(card.card_type, Some(CardType::Visa));
    }
}
