//! Notification bodies for each cycle outcome.

use ammonia::clean_text;

use super::Notification;

const SIGN_OFF: &str = "<p>Best regards,</p>\n<p>Your Auto-Blogger</p>";

/// The cycle ran but found no eligible article.
pub fn nothing_to_publish(to: &str) -> Notification {
    Notification {
        to: to.to_string(),
        subject: "Auto-Publish: No Unpublished Blogs Found".to_string(),
        html: format!(
            "<p>Dear Admin,</p>\n<p>The auto-publish job ran, but no unpublished blogs were found in the database.</p>\n{}",
            SIGN_OFF
        ),
    }
}

/// An article went out to the hosting service.
pub fn published(
    to: &str,
    title: &str,
    hosted_post_id: &str,
    hosted_post_url: &str,
    scheduled_for: &str,
) -> Notification {
    let url = clean_text(hosted_post_url);
    Notification {
        to: to.to_string(),
        subject: format!("Blog Published: {}", title),
        html: format!(
            "<p>Dear Admin,</p>\n\
             <p>A new blog post has been successfully published:</p>\n\
             <p><strong>Title:</strong> {}</p>\n\
             <p><strong>Post ID:</strong> {}</p>\n\
             <p><strong>Post URL:</strong> <a href=\"{url}\">{url}</a></p>\n\
             <p><strong>Scheduled For:</strong> {}</p>\n\
             {}",
            clean_text(title),
            clean_text(hosted_post_id),
            clean_text(scheduled_for),
            SIGN_OFF,
        ),
    }
}

/// A selected article could not be published.
pub fn cycle_failed(to: &str, title: &str, error: &str) -> Notification {
    Notification {
        to: to.to_string(),
        subject: format!("Auto-Publish Failed: {}", title),
        html: format!(
            "<p>Dear Admin,</p>\n\
             <p>The auto-publish job could not publish a blog. It remains unpublished and will be retried on the next run.</p>\n\
             <p><strong>Title:</strong> {}</p>\n\
             <p><strong>Error:</strong> {}</p>\n\
             {}",
            clean_text(title),
            clean_text(error),
            SIGN_OFF,
        ),
    }
}

/// Sent on demand to confirm the notifier reaches the admin.
pub fn connectivity_check(to: &str) -> Notification {
    Notification {
        to: to.to_string(),
        subject: "Test Email from Auto-Blogger".to_string(),
        html: format!(
            "<p>This is a test email sent from your Auto-Blogger application.</p>\n\
             <p>If you received this, your email configuration is working!</p>\n\
             {}",
            SIGN_OFF
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_to_publish() {
        let n = nothing_to_publish("admin@example.com");
        assert_eq!(n.to, "admin@example.com");
        assert_eq!(n.subject, "Auto-Publish: No Unpublished Blogs Found");
        assert!(n.html.contains("no unpublished blogs"));
    }

    #[test]
    fn test_published_includes_details() {
        let url = "https://example.blogspot.com/harbor.html";
        let n = published(
            "admin@example.com",
            "Harbor Reopens",
            "555",
            url,
            "2026-03-01 09:30:00",
        );
        assert_eq!(n.subject, "Blog Published: Harbor Reopens");
        assert!(n.html.contains("<strong>Post ID:</strong> 555"));
        assert!(n.html.contains(&format!("<a href=\"{}\">", clean_text(url))));
        assert!(n.html.contains(&clean_text("Harbor Reopens")));
        assert!(n.html.contains(&clean_text("2026-03-01 09:30:00")));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let n = cycle_failed("a@b.c", "<script>alert(1)</script>", "bad <b>thing</b>");
        assert!(!n.html.contains("<script>"));
        assert!(!n.html.contains("<b>"));
        assert!(n.html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_connectivity_check() {
        let n = connectivity_check("admin@example.com");
        assert_eq!(n.to, "admin@example.com");
        assert_eq!(n.subject, "Test Email from Auto-Blogger");
        assert!(n.html.contains("configuration is working"));
    }
}
