//! `sj-cli contact`

use sports_jersey_storefront::api::ContactMessage;
use sports_jersey_storefront::checkout::send_contact;
use sports_jersey_storefront::{AppError, AppState, Result};

/// Send a contact message and print the store's reply.
pub async fn send(
    state: &AppState,
    name: String,
    email: String,
    message: String,
    phone: Option<String>,
) -> Result<()> {
    if message.trim().is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    let message = ContactMessage {
        name,
        email,
        message,
        phone: phone.filter(|p| !p.trim().is_empty()),
    };
    let reply = send_contact(state.api(), &message).await?;
    println!("{reply}");
    Ok(())
}
