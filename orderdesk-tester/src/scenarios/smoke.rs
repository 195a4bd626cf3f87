use anyhow::{Result, ensure};
use orderdesk_core::{
    CurrencyCode, ItemIndex, Locale, Money, OrderDraft, Quantity, format_money,
};

use super::line_item;

/// Fixed add/remove walk with hand-checked totals.
pub fn run() -> Result<()> {
    let mut draft = OrderDraft::new();

    let widget = draft.add_line_item(line_item("1", Quantity::whole(2), Money::from_cents(1_000)))?;
    let gadget =
        draft.add_line_item(line_item("2", Quantity::from_hundredths(250), Money::from_cents(250)))?;
    ensure!(draft.total() == Money::from_cents(2_625), "total after two adds was {}", draft.total());

    let rejected = line_item("3", Quantity::ZERO, Money::from_cents(100));
    ensure!(draft.add_line_item(rejected).is_err(), "zero quantity was accepted");
    ensure!(draft.len() == 2, "rejected add changed the draft");

    ensure!(draft.remove_line_item(widget).is_some(), "widget row missing");
    ensure!(draft.remove_line_item(widget).is_none(), "widget removed twice");
    ensure!(draft.remove_line_item(ItemIndex::new(99)).is_none(), "unknown index removed a row");
    ensure!(draft.total() == Money::from_cents(625), "total after removal was {}", draft.total());
    ensure!(draft.find(gadget).is_some(), "gadget row lost");

    ensure!(draft.item_count() == 2, "item_count was {}", draft.item_count());
    let shown = format_money(draft.total(), Locale::EnUs, &CurrencyCode::eur());
    ensure!(shown == "€6.25", "formatted total was {shown}");
    Ok(())
}
