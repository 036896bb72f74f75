//! Value objects for the order domain.

use common::Username;
use serde::{Deserialize, Serialize};

/// Marker stored in the customer snapshot for a profile field that was not set.
pub const NOT_PROVIDED: &str = "Not provided";

/// Catalog identifier of a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new product ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the product ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Peso amount represented in centavos to avoid floating point issues.
///
/// Persisted as a peso number (`80`, `15.5`) to match the stored documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    /// Amount in centavos (e.g., 1000 = ₱10.00)
    cents: i64,
}

impl Money {
    /// Creates a new Money amount from centavos.
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Creates a new Money amount from a whole peso value.
    ///
    /// Returns `None` if the amount does not fit in centavos.
    pub fn from_pesos(pesos: i64) -> Option<Self> {
        pesos.checked_mul(100).map(Self::from_cents)
    }

    /// Returns zero money.
    pub const fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in centavos.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the peso portion (whole number).
    pub fn pesos(&self) -> i64 {
        self.cents / 100
    }

    /// Returns the centavo portion (remainder after pesos).
    pub fn cents_part(&self) -> i64 {
        self.cents.abs() % 100
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Multiplies by a quantity, or `None` on overflow.
    pub fn checked_multiply(&self, quantity: u32) -> Option<Money> {
        self.cents
            .checked_mul(i64::from(quantity))
            .map(Money::from_cents)
    }

    /// Adds two amounts, or `None` on overflow.
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.cents.checked_add(rhs.cents).map(Money::from_cents)
    }

    /// Sums amounts, or `None` if any partial sum overflows.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Money>) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.cents < 0 {
            write!(f, "-₱{}.{:02}", self.pesos().abs(), self.cents_part())
        } else {
            write!(f, "₱{}.{:02}", self.pesos(), self.cents_part())
        }
    }
}

impl Serialize for Money {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.cents % 100 == 0 {
            serializer.serialize_i64(self.pesos())
        } else {
            serializer.serialize_f64(self.cents as f64 / 100.0)
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PesoVisitor)
    }
}

struct PesoVisitor;

impl serde::de::Visitor<'_> for PesoVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a peso amount")
    }

    fn visit_i64<E: serde::de::Error>(self, pesos: i64) -> Result<Money, E> {
        Money::from_pesos(pesos).ok_or_else(|| E::custom("peso amount out of range"))
    }

    fn visit_u64<E: serde::de::Error>(self, pesos: u64) -> Result<Money, E> {
        i64::try_from(pesos)
            .ok()
            .and_then(Money::from_pesos)
            .ok_or_else(|| E::custom("peso amount out of range"))
    }

    fn visit_f64<E: serde::de::Error>(self, pesos: f64) -> Result<Money, E> {
        let cents = (pesos * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, which is itself out of range
        if !cents.is_finite() || cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return Err(E::custom("peso amount out of range"));
        }
        Ok(Money::from_cents(cents as i64))
    }
}

/// A purchased line, copied from the cart at checkout.
///
/// Immutable once the order is placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub seller_username: Username,
    /// Unit price.
    pub price: Money,
    pub quantity: u32,
    #[serde(default)]
    pub image_url: String,
    /// Unit label shown next to the price, e.g. "kg".
    #[serde(default)]
    pub unit: String,
}

impl OrderItem {
    /// Creates an order item with empty image and unit labels.
    pub fn new(
        product_id: impl Into<ProductId>,
        product_name: impl Into<String>,
        seller_username: impl Into<Username>,
        price: Money,
        quantity: u32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            seller_username: seller_username.into(),
            price,
            quantity,
            image_url: String::new(),
            unit: String::new(),
        }
    }

    /// Sets the unit label.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Sets the image URL.
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// Returns price × quantity, or `None` on overflow.
    pub fn line_total(&self) -> Option<Money> {
        self.price.checked_multiply(self.quantity)
    }
}

/// Profile fields of the buyer as read from their user document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub username: Option<Username>,
}

/// Buyer contact details frozen into an order when it is placed.
///
/// Later profile edits never change an existing snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSnapshot {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl CustomerSnapshot {
    /// Captures the profile, substituting [`NOT_PROVIDED`] per missing field.
    pub fn capture(profile: Option<&UserProfile>) -> Self {
        let field = |value: Option<&String>| {
            value
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .unwrap_or(NOT_PROVIDED)
                .to_string()
        };

        Self {
            name: field(profile.and_then(|p| p.full_name.as_ref())),
            phone: field(profile.and_then(|p| p.phone.as_ref())),
            address: field(profile.and_then(|p| p.address.as_ref())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_string_conversion() {
        let id = ProductId::new("rice-5kg");
        assert_eq!(id.as_str(), "rice-5kg");

        let id2: ProductId = "eggs-12".into();
        assert_eq!(id2.as_str(), "eggs-12");
    }

    #[test]
    fn test_money_from_cents() {
        let money = Money::from_cents(1234);
        assert_eq!(money.cents(), 1234);
        assert_eq!(money.pesos(), 12);
        assert_eq!(money.cents_part(), 34);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(1234).to_string(), "₱12.34");
        assert_eq!(Money::from_cents(8000).to_string(), "₱80.00");
        assert_eq!(Money::from_cents(5).to_string(), "₱0.05");
        assert_eq!(Money::from_cents(-1234).to_string(), "-₱12.34");
    }

    #[test]
    fn test_money_checked_sum() {
        let total = Money::checked_sum([Money::from_cents(100), Money::from_cents(250)]);
        assert_eq!(total, Some(Money::from_cents(350)));

        let overflow = Money::checked_sum([Money::from_cents(i64::MAX), Money::from_cents(1)]);
        assert_eq!(overflow, None);
    }

    #[test]
    fn test_money_from_pesos_out_of_range() {
        assert_eq!(Money::from_pesos(80), Some(Money::from_cents(8000)));
        assert_eq!(Money::from_pesos(i64::MAX / 10), None);
    }

    #[test]
    fn test_money_serializes_as_pesos() {
        assert_eq!(serde_json::to_string(&Money::from_cents(8000)).unwrap(), "80");
        assert_eq!(serde_json::to_string(&Money::from_cents(1550)).unwrap(), "15.5");
        assert_eq!(serde_json::to_string(&Money::from_cents(1999)).unwrap(), "19.99");
    }

    #[test]
    fn test_money_reads_stored_peso_amounts() {
        let whole: Money = serde_json::from_str("80").unwrap();
        let fractional: Money = serde_json::from_str("15.5").unwrap();
        let cents: Money = serde_json::from_str("19.99").unwrap();

        assert_eq!(whole, Money::from_cents(8000));
        assert_eq!(fractional, Money::from_cents(1550));
        assert_eq!(cents, Money::from_cents(1999));
        assert!(serde_json::from_str::<Money>("\"80\"").is_err());
        assert!(serde_json::from_str::<Money>("1e300").is_err());
    }

    #[test]
    fn test_line_total() {
        let item = OrderItem::new("rice-5kg", "Rice", "ana", Money::from_cents(1000), 3);
        assert_eq!(item.line_total(), Some(Money::from_cents(3000)));
    }

    #[test]
    fn test_line_total_overflow() {
        let item = OrderItem::new("gold", "Gold", "ana", Money::from_cents(i64::MAX / 2), 3);
        assert_eq!(item.line_total(), None);
    }

    #[test]
    fn test_order_item_uses_camel_case_fields() {
        let item = OrderItem::new("rice-5kg", "Rice", "ana", Money::from_cents(999), 2)
            .with_unit("kg")
            .with_image_url("https://img/rice.png");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["productId"], "rice-5kg");
        assert_eq!(json["sellerUsername"], "ana");
        assert_eq!(json["imageUrl"], "https://img/rice.png");

        let back: OrderItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_snapshot_falls_back_per_field() {
        let profile = UserProfile {
            full_name: Some("Juan Dela Cruz".into()),
            phone: Some("   ".into()),
            address: None,
            username: None,
        };
        let snapshot = CustomerSnapshot::capture(Some(&profile));
        assert_eq!(snapshot.name, "Juan Dela Cruz");
        assert_eq!(snapshot.phone, NOT_PROVIDED);
        assert_eq!(snapshot.address, NOT_PROVIDED);
    }

    #[test]
    fn test_snapshot_without_profile() {
        let snapshot = CustomerSnapshot::capture(None);
        assert_eq!(snapshot.name, NOT_PROVIDED);
        assert_eq!(snapshot.phone, NOT_PROVIDED);
        assert_eq!(snapshot.address, NOT_PROVIDED);
    }

    #[test]
    fn test_profile_reads_user_document_fields() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "fullName": "Ana Santos",
            "phone": "0917",
            "username": "ana",
            "profileImageUrl": "ignored"
        }))
        .unwrap();
        assert_eq!(profile.full_name.as_deref(), Some("Ana Santos"));
        assert_eq!(profile.address, None);
        assert_eq!(profile.username, Some(Username::new("ana")));
    }
}
