use serde::{Deserialize, Serialize};

/// Site-wide settings edited from the admin settings page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteSettings {
    pub site_name: String,
    pub site_description: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub contact_address: String,
    pub social_media: SocialMedia,
    pub notifications: NotificationSettings,
    pub maintenance: MaintenanceSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialMedia {
    pub facebook: String,
    pub twitter: String,
    pub linkedin: String,
    pub instagram: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub push_notifications: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MaintenanceSettings {
    pub maintenance_mode: bool,
    pub maintenance_message: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: "ARDENT SOFT".to_string(),
            site_description: "Kelajakni bugun yaratamiz".to_string(),
            contact_email: "info@ardentsoft.uz".to_string(),
            contact_phone: "+998 90 123 45 67".to_string(),
            contact_address: "Toshkent, O'zbekiston".to_string(),
            social_media: SocialMedia {
                facebook: "https://facebook.com/ardentsoft".to_string(),
                twitter: "https://twitter.com/ardentsoft".to_string(),
                linkedin: "https://linkedin.com/company/ardentsoft".to_string(),
                instagram: "https://instagram.com/ardentsoft".to_string(),
            },
            notifications: NotificationSettings::default(),
            maintenance: MaintenanceSettings {
                maintenance_mode: false,
                maintenance_message: "Sayt texnik ishlar olib borilmoqda. Tez orada qaytamiz!"
                    .to_string(),
            },
        }
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            sms_notifications: false,
            push_notifications: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_update_keeps_defaults() {
        let settings: SiteSettings =
            serde_json::from_str(r#"{"siteName":"Ardent","maintenance":{"maintenanceMode":true}}"#)
                .unwrap();
        assert_eq!(settings.site_name, "Ardent");
        assert!(settings.maintenance.maintenance_mode);
        assert!(settings.maintenance.maintenance_message.is_empty());
        assert_eq!(settings.contact_email, "info@ardentsoft.uz");
        assert!(settings.notifications.email_notifications);
    }
}
