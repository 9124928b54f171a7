/// Severity of a user-visible notification, used by the frontend to pick
/// how the message is presented.
#[derive(Debug, Clone)]
pub enum NotificationType {
    /// Neutral informational message.
    Info,
    /// A non-critical issue the user should know about.
    Warning,
    /// A failure that may affect functionality, e.g. a rejected download.
    Error,
}

/// A notification payload intended for the user interface.
///
/// Notifications are transient side-channel messages; widget state itself
/// always travels as resolution/playback updates.
#[derive(Debug, Clone)]
pub struct NotificationMessage {
    pub notification_type: NotificationType,
    /// The text content to display to the user.
    pub message: String,
}
