//! 採購單通知

use procure_core::{OrderGateway, ProcureError, SupplierProfile};

/// 決定通知收件人：主要郵件 → 第一個非空的聯絡人郵件
pub fn resolve_recipient(profile: &SupplierProfile) -> procure_core::Result<String> {
    profile
        .email
        .iter()
        .chain(profile.contact_emails.iter())
        .map(|email| email.trim())
        .find(|email| !email.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ProcureError::MissingRecipient(profile.supplier.clone()))
}

/// 發送採購單通知，回傳收件人
pub fn notify(
    gateway: &mut dyn OrderGateway,
    order_id: &str,
    profile: &SupplierProfile,
) -> procure_core::Result<String> {
    let recipient = resolve_recipient(profile)?;
    gateway
        .send_order_notification(order_id, &recipient)
        .map_err(|e| ProcureError::Notification {
            order_id: order_id.to_string(),
            reason: e.to_string(),
        })?;

    tracing::info!(order_id, recipient = %recipient, "採購單通知已發送");
    Ok(recipient)
}
