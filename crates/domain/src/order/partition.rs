//! Grouping of order items by seller.

use std::collections::HashMap;

use common::Username;

use super::{OrderError, OrderItem};

/// Items of one seller, in checkout order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerGroup {
    pub seller: Username,
    pub items: Vec<OrderItem>,
}

/// Order items grouped by seller.
///
/// Groups appear in the order their seller first appears in the input, and
/// items keep their relative order inside each group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerPartition {
    groups: Vec<SellerGroup>,
}

impl SellerPartition {
    /// Groups `items` by `seller_username`.
    ///
    /// Fails on an empty list or on any item with a blank seller.
    pub fn from_items(items: &[OrderItem]) -> Result<Self, OrderError> {
        if items.is_empty() {
            return Err(OrderError::NoItems);
        }

        let mut index: HashMap<&Username, usize> = HashMap::new();
        let mut groups: Vec<SellerGroup> = Vec::new();

        for item in items {
            if item.seller_username.is_blank() {
                return Err(OrderError::MissingSeller {
                    product_id: item.product_id.to_string(),
                });
            }

            match index.get(&item.seller_username) {
                Some(&slot) => groups[slot].items.push(item.clone()),
                None => {
                    index.insert(&item.seller_username, groups.len());
                    groups.push(SellerGroup {
                        seller: item.seller_username.clone(),
                        items: vec![item.clone()],
                    });
                }
            }
        }

        Ok(Self { groups })
    }

    /// Returns the distinct sellers in group order.
    pub fn sellers(&self) -> Vec<Username> {
        self.groups.iter().map(|g| g.seller.clone()).collect()
    }

    /// Returns the items of one seller.
    pub fn items_for(&self, seller: &Username) -> Option<&[OrderItem]> {
        self.groups
            .iter()
            .find(|g| &g.seller == seller)
            .map(|g| g.items.as_slice())
    }

    /// Iterates over the groups in order.
    pub fn iter(&self) -> impl Iterator<Item = &SellerGroup> {
        self.groups.iter()
    }

    /// Returns the number of sellers.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Always false: a partition is built from a non-empty list.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for &'a SellerPartition {
    type Item = &'a SellerGroup;
    type IntoIter = std::slice::Iter<'a, SellerGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
