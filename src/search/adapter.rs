//! Search hits → listing items.
//!
//! Search results are rendered by the same listing path as ordinary content,
//! so each hit is reshaped into a [`NormalizedListItem`].
//!
//! The hit's `title` doubles as the item `id`. Two posts sharing a title will
//! collide; downstream code keys on title identity, so this is kept as is.

use crate::model::types::{
    ListNode, NodeFields, NodeFrontmatter, NormalizedListItem, SearchResultItem,
};

pub fn to_list_item(item: &SearchResultItem) -> NormalizedListItem {
    NormalizedListItem {
        node: ListNode {
            excerpt: item.excerpt.clone(),
            fields: NodeFields {
                slug: item.slug.clone(),
            },
            frontmatter: NodeFrontmatter {
                category: item.category.clone(),
                date: item.published_at.clone(),
                title: item.title.clone(),
            },
            id: item.title.clone(),
        },
    }
}

pub fn to_node_array(items: &[SearchResultItem]) -> Vec<NormalizedListItem> {
    items.iter().map(to_list_item).collect()
}
