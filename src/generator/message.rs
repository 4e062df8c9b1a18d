//! Plain-text order and scheduling messages.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt::{Display, Write};

use crate::cart::Cart;
use crate::config::format_price;
use crate::error::{OrderError, Result};
use crate::model::Address;

/// Render the order message for a cart.
///
/// One line per item with its line total, followed by its toppings and
/// add-ons, then the delivery fee (if any) and the total.
pub fn render_order_message(cart: &Cart) -> Result<String> {
    if cart.is_empty() {
        return Err(OrderError::EmptyCart);
    }

    let totals = cart.compute_totals();
    let mut output = String::new();

    writeln!(output, "Pedido:").unwrap();
    writeln!(output).unwrap();

    for item in cart.items() {
        writeln!(
            output,
            "{} x{}: {}",
            item.name,
            item.quantity,
            format_price(item.line_total())
        )
        .unwrap();

        if !item.extras.is_empty() {
            writeln!(output, "  Acompanhamentos: {}", item.extras.join(", ")).unwrap();
        }

        if !item.addons.is_empty() {
            writeln!(output, "  Adicionais: {}", item.addon_names().join(", ")).unwrap();
        }
    }

    if totals.delivery_fee > Decimal::ZERO {
        write!(
            output,
            "\nTaxa de entrega: {}",
            format_price(totals.delivery_fee)
        )
        .unwrap();
    }

    write!(output, "\nTotal: {}", format_price(totals.total)).unwrap();

    Ok(output)
}

/// Append the delivery address block to a rendered order message.
pub fn append_delivery_address(message: &mut String, address: &Address) {
    write!(message, "\n\nEndereço: {}", address.summary()).unwrap();
    if !address.postal_code.trim().is_empty() {
        write!(message, "\nCEP: {}", address.postal_code.trim()).unwrap();
    }
}

/// Request for a same-day order at `slot`, e.g. "... hoje (09/03) às 20:30h."
pub fn render_schedule_request(date: NaiveDate, slot: impl Display) -> String {
    format!(
        "Olá! Gostaria de agendar um pedido para hoje ({}) às {}h.",
        date.format("%d/%m"),
        slot
    )
}
