//! Outgoing message generation.

mod message;
mod whatsapp;

pub use message::{append_delivery_address, render_order_message, render_schedule_request};
pub use whatsapp::WhatsAppLink;
