//! HTML bodies for the transactional emails.
//!
//! Templates are plain functions returning a [`RenderedEmail`]. Every
//! user-supplied value is HTML-escaped before interpolation.

use chrono::{Datelike, Utc};

/// Minutes a password reset link stays valid. Mirrors the expiry written
/// to `password_resets.expires_at`.
pub const RESET_LINK_EXPIRY_MINUTES: i64 = 30;

const HEADER_COLOR: &str = "#1a3c5e";

/// Subject and HTML body ready to hand to [`crate::Mailer::send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

/// Fields of a contact enquiry shown in the confirmation and alert emails.
#[derive(Debug, Clone)]
pub struct EnquirySummary {
    pub id: i64,
    pub full_name: String,
    pub mobile: String,
    pub email: String,
    pub panchayat: String,
    pub category: String,
    pub subject: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// Password reset link sent by `POST /api/auth/forgot-password`.
pub fn password_reset(app_name: &str, frontend_url: &str, name: &str, token: &str) -> RenderedEmail {
    let link = reset_link(frontend_url, token);
    let body = format!(
        r#"<h2 style="color:{HEADER_COLOR};margin-top:0;">Password Reset</h2>
<p>Hi <strong>{name}</strong>,</p>
<p>We received a request to reset your admin account password. Click the button below to set a new password:</p>
<div style="text-align:center;margin:32px 0;">
  <a href="{link}" style="background:{HEADER_COLOR};color:#fff;padding:13px 32px;border-radius:6px;text-decoration:none;font-weight:bold;">Reset Password</a>
</div>
<p style="color:#666;font-size:13px;">This link will expire in <strong>{RESET_LINK_EXPIRY_MINUTES} minutes</strong>.</p>
<p style="color:#666;font-size:13px;">If you didn't request this, please ignore this email. Your password will remain unchanged.</p>"#,
        name = escape_html(name),
        link = escape_html(&link),
    );
    RenderedEmail {
        subject: format!("[{app_name}] Password Reset Request"),
        html: layout(app_name, &body),
    }
}

/// Sent to a newly registered admin. The password is never included.
pub fn welcome(app_name: &str, frontend_url: &str, name: &str, email: &str) -> RenderedEmail {
    let login = format!("{}/admin/login", frontend_url.trim_end_matches('/'));
    let body = format!(
        r#"<h2 style="color:{HEADER_COLOR};margin-top:0;">Welcome, {name}!</h2>
<p>An admin account has been created for you.</p>
<div style="background:#f8f9fa;border-left:4px solid {HEADER_COLOR};padding:16px;border-radius:4px;margin:20px 0;">
  <p style="margin:4px 0;"><strong>Email:</strong> {email}</p>
</div>
<p>Sign in at <a href="{login}">{login}</a> with the password you were given, then change it from your profile.</p>"#,
        name = escape_html(name),
        email = escape_html(email),
        login = escape_html(&login),
    );
    RenderedEmail {
        subject: format!("[{app_name}] Your Admin Account Has Been Created"),
        html: layout(app_name, &body),
    }
}

/// Confirmation sent to the person who submitted a contact enquiry.
pub fn enquiry_received(app_name: &str, enquiry: &EnquirySummary) -> RenderedEmail {
    let body = format!(
        r#"<h2 style="color:{HEADER_COLOR};margin-top:0;">Thank you for reaching out</h2>
<p>Hi <strong>{name}</strong>,</p>
<p>We have received your enquiry (reference #{id}) and will get back to you soon.</p>
{details}"#,
        name = escape_html(&enquiry.full_name),
        id = enquiry.id,
        details = enquiry_details(enquiry),
    );
    RenderedEmail {
        subject: format!("[{app_name}] We received your enquiry"),
        html: layout(app_name, &body),
    }
}

/// Alert sent to the configured admin inbox for every new enquiry.
pub fn admin_enquiry_alert(app_name: &str, enquiry: &EnquirySummary) -> RenderedEmail {
    let body = format!(
        r#"<h2 style="color:{HEADER_COLOR};margin-top:0;">New enquiry #{id}</h2>
<p><strong>{name}</strong> ({email}, {mobile}) submitted an enquiry.</p>
{details}"#,
        id = enquiry.id,
        name = escape_html(&enquiry.full_name),
        email = escape_html(&enquiry.email),
        mobile = escape_html(&enquiry.mobile),
        details = enquiry_details(enquiry),
    );
    RenderedEmail {
        subject: format!("[{app_name}] New Enquiry: {}", enquiry.category),
        html: layout(app_name, &body),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Frontend URL for the reset form carrying `token`.
pub fn reset_link(frontend_url: &str, token: &str) -> String {
    format!(
        "{}/admin/reset-password?token={token}",
        frontend_url.trim_end_matches('/')
    )
}

/// Escape the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn enquiry_details(enquiry: &EnquirySummary) -> String {
    let rows = [
        ("Panchayat", enquiry.panchayat.as_str()),
        ("Category", enquiry.category.as_str()),
        ("Subject", enquiry.subject.as_str()),
        ("Message", enquiry.message.as_str()),
    ];
    let mut html = String::from(r#"<table style="width:100%;border-collapse:collapse;margin:20px 0;">"#);
    for (label, value) in rows {
        html.push_str(&format!(
            r#"<tr><td style="padding:6px 0;color:#666;width:120px;vertical-align:top;">{label}</td><td style="padding:6px 0;">{}</td></tr>"#,
            escape_html(value).replace('\n', "<br>")
        ));
    }
    html.push_str("</table>");
    html
}

fn layout(app_name: &str, body: &str) -> String {
    let year = Utc::now().year();
    let app_name = escape_html(app_name);
    format!(
        r#"<!DOCTYPE html>
<html>
<body style="font-family:Arial,sans-serif;background:#f4f4f4;margin:0;padding:0;">
  <div style="max-width:560px;margin:40px auto;background:#fff;border-radius:8px;overflow:hidden;">
    <div style="background:{HEADER_COLOR};padding:28px 32px;">
      <h1 style="color:#fff;margin:0;font-size:22px;">{app_name}</h1>
    </div>
    <div style="padding:32px;">
{body}
      <hr style="border:none;border-top:1px solid #eee;margin:24px 0;">
      <p style="color:#999;font-size:12px;margin:0;">&copy; {year} {app_name}. All rights reserved.</p>
    </div>
  </div>
</body>
</html>"#
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
