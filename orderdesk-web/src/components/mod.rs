pub mod button;
pub mod chart;
pub mod confirm_button;
pub mod customer_select;
pub mod header;
pub mod manual_item_form;
pub mod order_items_table;
pub mod price_list_table;
pub mod table_filter;
