//! 领域模型

mod item;

pub use item::{ITEM_NAME_MAX_CHARS, Item, ItemSearchCond, ItemUpdate, NewItem};
