use anyhow::{Result, bail, ensure};
use orderdesk_core::{ItemIndex, Money, OrderDraft, Quantity};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

use super::line_item;

const STEPS: usize = 200;

/// Rows the draft should hold: index -> (quantity hundredths, price cents).
type Expected = BTreeMap<ItemIndex, (i64, i64)>;

/// Cents of `quantity × price`, rounded half away from zero, computed in
/// `i128` without going through the draft's own arithmetic.
fn expected_line_cents(quantity_hundredths: i64, price_cents: i64) -> i128 {
    let product = i128::from(quantity_hundredths) * i128::from(price_cents);
    let rounded = (product.abs() + 50) / 100;
    if product < 0 { -rounded } else { rounded }
}

fn expected_total(rows: &Expected) -> i128 {
    rows.values()
        .map(|&(quantity, price)| expected_line_cents(quantity, price))
        .sum()
}

/// Seeded add/remove/invalid-add/unknown-remove sequence; invariants are
/// checked after every step.
pub fn run(seed: u64) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut draft = OrderDraft::new();
    let mut expected = Expected::new();

    for step in 0..STEPS {
        match rng.gen_range(0..10) {
            0..=4 => {
                let quantity = Quantity::from_hundredths(rng.gen_range(1..=1_000));
                let price = Money::from_cents(rng.gen_range(0..=100_000));
                let product = rng.gen_range(1..=20).to_string();
                let index = draft.add_line_item(line_item(&product, quantity, price))?;
                expected.insert(index, (quantity.hundredths(), price.cents()));
            }
            5 | 6 => {
                let before = draft.clone();
                let quantity = Quantity::from_hundredths(rng.gen_range(-500..=0));
                if draft.add_line_item(line_item("1", quantity, Money::from_cents(100))).is_ok() {
                    bail!("step {step}: quantity {quantity} was accepted");
                }
                ensure!(draft == before, "step {step}: rejected add mutated the draft");
            }
            7 | 8 => {
                if draft.is_empty() {
                    continue;
                }
                let pick = rng.gen_range(0..draft.len());
                let index = draft.items()[pick].index;
                ensure!(
                    draft.remove_line_item(index).is_some(),
                    "step {step}: row {index} could not be removed"
                );
                expected.remove(&index);
            }
            _ => {
                let before = draft.clone();
                let unknown = ItemIndex::new(draft.item_count().saturating_add(rng.gen_range(0..5)));
                ensure!(
                    draft.remove_line_item(unknown).is_none(),
                    "step {step}: unknown row {unknown} was removed"
                );
                ensure!(draft == before, "step {step}: unknown remove mutated the draft");
            }
        }
        let want = expected_total(&expected);
        ensure!(
            i128::from(draft.total().cents()) == want,
            "step {step}: total {} differs from quantity × price sum {want} cents",
            draft.total()
        );
        ensure!(
            draft.len() == expected.len(),
            "step {step}: draft holds {} rows, expected {}",
            draft.len(),
            expected.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_line_cents_rounds_half_away_from_zero() {
        assert_eq!(expected_line_cents(150, 999), 1_499);
        assert_eq!(expected_line_cents(250, 1_000), 2_500);
        assert_eq!(expected_line_cents(-150, 999), -1_499);
        assert_eq!(expected_line_cents(1, 50), 1);
        assert_eq!(expected_line_cents(1, 49), 0);
    }
}
