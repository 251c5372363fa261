pub mod extract_pantry_items;
