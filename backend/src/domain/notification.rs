//! Email notifications and their templates.
//!
//! Templates are plain string interpolation. Customer-supplied text is
//! HTML-escaped before it is embedded in a body.

use super::{AuthenticatedUser, Contact, EmailAddress, MaintenanceRequest, Order};

/// Subject of the customer's payment confirmation.
pub const ORDER_CONFIRMATION_SUBJECT: &str = "Order Confirmation";
/// Subject of the operator's new-order alert.
pub const NEW_ORDER_SUBJECT: &str = "New Order";
/// Subject of the operator's contact-form alert.
pub const CONTACT_ALERT_SUBJECT: &str = "New Contact Inquiry";
/// Subject of the operator's maintenance alert.
pub const MAINTENANCE_ALERT_SUBJECT: &str = "Maintenance Request Alert";
/// Subject of the customer's maintenance acknowledgement.
pub const MAINTENANCE_CONFIRMATION_SUBJECT: &str = "Maintenance Request Confirmation";

/// A single outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Recipient address.
    pub to: EmailAddress,
    /// Plain-text subject line.
    pub subject: String,
    /// HTML body with every interpolated field escaped.
    pub html_body: String,
}

impl Notification {
    /// Build a notification from its parts.
    pub fn new(to: EmailAddress, subject: impl Into<String>, html_body: impl Into<String>) -> Self {
        Self {
            to,
            subject: subject.into(),
            html_body: html_body.into(),
        }
    }

    /// Confirmation sent to the paying customer once an order is paid.
    pub fn order_confirmation(order: &Order) -> Self {
        let payment_id = order
            .payment_id()
            .map(AsRef::as_ref)
            .unwrap_or_default();
        Self::new(
            order.user_email().clone(),
            ORDER_CONFIRMATION_SUBJECT,
            format!(
                "Paid ₹{} for {}. Trans ID: {}",
                order.amount(),
                escape_html(order.project_name().as_ref()),
                escape_html(payment_id),
            ),
        )
    }

    /// Alert sent to the operator once an order is paid.
    pub fn new_order_alert(operator: &EmailAddress, order: &Order) -> Self {
        Self::new(
            operator.clone(),
            NEW_ORDER_SUBJECT,
            format!(
                "User {} paid ₹{}",
                escape_html(order.user_email().as_ref()),
                order.amount()
            ),
        )
    }

    /// Alert sent to the operator when a contact form is submitted.
    pub fn contact_alert(operator: &EmailAddress, contact: &Contact) -> Self {
        Self::new(
            operator.clone(),
            CONTACT_ALERT_SUBJECT,
            format!(
                "From: {} ({})<br>Msg: {}",
                escape_html(&contact.name),
                escape_html(contact.email.as_ref()),
                escape_html(&contact.message),
            ),
        )
    }

    /// Alert sent to the operator when a maintenance request is raised.
    pub fn maintenance_alert(operator: &EmailAddress, request: &MaintenanceRequest) -> Self {
        Self::new(
            operator.clone(),
            MAINTENANCE_ALERT_SUBJECT,
            format!(
                "<h2>New Maintenance Request</h2>\
                 <p><b>Client:</b> {}</p>\
                 <p><b>Issue Type:</b> {}</p>\
                 <p><b>Selected Add-ons:</b> {}</p>\
                 <p><b>Estimated Cost:</b> ₹{}</p>\
                 <hr>\
                 <p><b>Description:</b><br>{}</p>",
                escape_html(request.user_email.as_ref()),
                escape_html(&request.issue_type),
                escape_html(&request.addons),
                request.estimated_cost,
                escape_html(&request.description),
            ),
        )
    }

    /// Acknowledgement sent to the customer who raised a maintenance request.
    pub fn maintenance_confirmation(
        customer: &AuthenticatedUser,
        request: &MaintenanceRequest,
    ) -> Self {
        Self::new(
            request.user_email.clone(),
            MAINTENANCE_CONFIRMATION_SUBJECT,
            format!(
                "<h2>Request Received</h2>\
                 <p>Hi {},</p>\
                 <p>We received your request for <b>{}</b>.</p>\
                 <p>Estimated Cost: ₹{}</p>\
                 <p>Our team will review it and contact you shortly.</p>",
                escape_html(&customer.name),
                escape_html(&request.issue_type),
                request.estimated_cost,
            ),
        )
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
