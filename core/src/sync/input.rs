// cart_sync/src/sync/input.rs

//! Add-to-cart input and its validation against the required-field set.

use crate::error::{CartError, CartField, CartResult, FieldViolation};
use crate::model::{NewCartLine, ProductId};
use serde::Deserialize;

/// Fields that must be present on every add-to-cart request, in the order they are checked.
pub const REQUIRED_FIELDS: [CartField; 4] = [CartField::ProductId, CartField::Name, CartField::Price, CartField::Image];

/// Quantity used when a request omits it.
pub const DEFAULT_QUANTITY: u32 = 1;

/// A requested cart line as received from a caller. `None` means the field was not supplied.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartItem {
  pub product_id: Option<String>,
  pub name: Option<String>,
  pub price: Option<f64>,
  pub image: Option<String>,
  pub quantity: Option<u32>,
}

impl AddToCartItem {
  pub fn new(product_id: impl Into<String>, name: impl Into<String>, price: f64, image: impl Into<String>) -> Self {
    Self {
      product_id: Some(product_id.into()),
      name: Some(name.into()),
      price: Some(price),
      image: Some(image.into()),
      quantity: None,
    }
  }

  pub fn with_quantity(mut self, quantity: u32) -> Self {
    self.quantity = Some(quantity);
    self
  }

  fn has(&self, field: CartField) -> bool {
    match field {
      CartField::ProductId => self.product_id.is_some(),
      CartField::Name => self.name.is_some(),
      CartField::Price => self.price.is_some(),
      CartField::Image => self.image.is_some(),
      CartField::Quantity => self.quantity.is_some(),
    }
  }

  /// First required field absent from this request, if any.
  pub fn first_missing_field(&self) -> Option<CartField> {
    REQUIRED_FIELDS.iter().copied().find(|field| !self.has(*field))
  }

  /// Checks presence first, then value constraints, and returns the line to write on create.
  ///
  /// The returned `quantity` is the requested increment (defaulted), not a stored total.
  pub fn validate(self) -> CartResult<NewCartLine> {
    if let Some(field) = self.first_missing_field() {
      return Err(CartError::missing(field));
    }

    let raw_product_id = self.product_id.ok_or_else(|| CartError::missing(CartField::ProductId))?;
    let product_id = ProductId::parse(&raw_product_id).map_err(|v| CartError::invalid(CartField::ProductId, v))?;
    let name = self.name.ok_or_else(|| CartError::missing(CartField::Name))?;
    let price = self.price.ok_or_else(|| CartError::missing(CartField::Price))?;
    if !price.is_finite() || price < 0.0 {
      return Err(CartError::invalid(CartField::Price, FieldViolation::OutOfRange));
    }
    let image = self.image.ok_or_else(|| CartError::missing(CartField::Image))?;

    let quantity = self.quantity.unwrap_or(DEFAULT_QUANTITY);
    if quantity == 0 {
      return Err(CartError::invalid(CartField::Quantity, FieldViolation::OutOfRange));
    }

    Ok(NewCartLine {
      product_id,
      name,
      price,
      image,
      quantity,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn assert_invalid(result: CartResult<NewCartLine>, field: CartField, violation: FieldViolation) {
    match result {
      Err(CartError::InvalidField { field: f, violation: v }) => {
        assert_eq!(f, field);
        assert_eq!(v, violation);
      }
      other => panic!("Expected InvalidField({}, {:?}), got {:?}", field, violation, other),
    }
  }

  #[test]
  fn quantity_defaults_to_one() {
    let line = AddToCartItem::new("p1", "Gloss", 20.0, "/x.png").validate().unwrap();
    assert_eq!(line.quantity, 1);
    assert_eq!(line.product_id.as_str(), "p1");
  }

  #[test]
  fn each_required_field_is_reported_when_missing() {
    let full = AddToCartItem::new("p1", "Gloss", 20.0, "/x.png");

    let mut item = full.clone();
    item.product_id = None;
    assert_invalid(item.validate(), CartField::ProductId, FieldViolation::Missing);

    let mut item = full.clone();
    item.name = None;
    assert_invalid(item.validate(), CartField::Name, FieldViolation::Missing);

    let mut item = full.clone();
    item.price = None;
    assert_invalid(item.validate(), CartField::Price, FieldViolation::Missing);

    let mut item = full;
    item.image = None;
    assert_invalid(item.validate(), CartField::Image, FieldViolation::Missing);
  }

  #[test]
  fn missing_fields_are_reported_in_declaration_order() {
    let item = AddToCartItem {
      price: Some(1.0),
      ..Default::default()
    };
    assert_eq!(item.first_missing_field(), Some(CartField::ProductId));

    let item = AddToCartItem {
      product_id: Some("p1".into()),
      price: Some(1.0),
      ..Default::default()
    };
    assert_eq!(item.first_missing_field(), Some(CartField::Name));
  }

  #[test]
  fn value_constraints() {
    let item = AddToCartItem::new("a/b", "Gloss", 20.0, "/x.png");
    assert_invalid(item.validate(), CartField::ProductId, FieldViolation::InvalidKey);

    let item = AddToCartItem::new("p1", "Gloss", f64::NAN, "/x.png");
    assert_invalid(item.validate(), CartField::Price, FieldViolation::OutOfRange);

    let item = AddToCartItem::new("p1", "Gloss", -1.0, "/x.png");
    assert_invalid(item.validate(), CartField::Price, FieldViolation::OutOfRange);

    let item = AddToCartItem::new("p1", "Gloss", 20.0, "/x.png").with_quantity(0);
    assert_invalid(item.validate(), CartField::Quantity, FieldViolation::OutOfRange);
  }

  #[test]
  fn deserializes_camel_case_with_absent_fields() {
    let item: AddToCartItem = serde_json::from_str(r#"{"productId":"p1","name":"Gloss","price":20.0}"#).unwrap();
    assert_eq!(item.product_id.as_deref(), Some("p1"));
    assert_eq!(item.image, None);
    assert_eq!(item.quantity, None);
    assert_eq!(item.first_missing_field(), Some(CartField::Image));
  }
}
