use serde::Serialize;

use super::{Collection, ListManager, StoreError};
use crate::models::{Message, MessageStatus};

/// Number of messages in each status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub new: usize,
    pub read: usize,
    pub replied: usize,
}

impl StatusCounts {
    pub fn get(&self, status: MessageStatus) -> usize {
        match status {
            MessageStatus::New => self.new,
            MessageStatus::Read => self.read,
            MessageStatus::Replied => self.replied,
        }
    }
}

impl ListManager<Message> {
    pub fn status_counts(&self) -> StatusCounts {
        self.list()
            .iter()
            .fold(StatusCounts::default(), |mut counts, message| {
                match message.status {
                    MessageStatus::New => counts.new += 1,
                    MessageStatus::Read => counts.read += 1,
                    MessageStatus::Replied => counts.replied += 1,
                }
                counts
            })
    }
}

impl Collection<Message> {
    /// Open a message for reading; unread messages become read
    pub async fn view(&mut self, id: i64) -> Result<Message, StoreError> {
        let message = self
            .manager()
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound(id))?;
        if message.status != MessageStatus::New {
            return Ok(message);
        }
        self.set_status(id, MessageStatus::Read).await
    }

    /// Statuses move freely in any direction
    pub async fn set_status(&mut self, id: i64, status: MessageStatus) -> Result<Message, StoreError> {
        self.modify(id, |message| message.status = status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FilterValue, Query};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn message(id: i64, name: &str, email: &str, text: &str, status: MessageStatus) -> Message {
        Message {
            id,
            name: name.into(),
            email: email.into(),
            phone: "+998901234567".into(),
            message: text.into(),
            status,
            created_at: NaiveDate::from_ymd_opt(2024, 7, 16)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
        }
    }

    fn inbox() -> Collection<Message> {
        Collection::in_memory(vec![
            message(1, "Akmal Karimov", "akmal@example.com", "Veb-sayt kerak", MessageStatus::New),
            message(2, "Nilufar", "nilufar@company.uz", "Mobil ilova narxlari?", MessageStatus::Read),
        ])
    }

    #[tokio::test]
    async fn viewing_a_new_message_marks_it_read() {
        let mut messages = inbox();

        let viewed = messages.view(1).await.unwrap();

        assert_eq!(viewed.status, MessageStatus::Read);
        assert_eq!(
            messages.manager().status_counts(),
            StatusCounts { new: 0, read: 2, replied: 0 }
        );
    }

    #[tokio::test]
    async fn viewing_a_replied_message_keeps_status() {
        let mut messages = inbox();
        messages.set_status(2, MessageStatus::Replied).await.unwrap();
        let viewed = messages.view(2).await.unwrap();
        assert_eq!(viewed.status, MessageStatus::Replied);
    }

    #[tokio::test]
    async fn statuses_can_move_backwards() {
        let mut messages = inbox();
        let reopened = messages.set_status(2, MessageStatus::New).await.unwrap();
        assert_eq!(reopened.status, MessageStatus::New);
        assert_eq!(messages.manager().status_counts().get(MessageStatus::New), 2);
    }

    #[tokio::test]
    async fn view_unknown_message_is_not_found() {
        let mut messages = inbox();
        assert!(matches!(messages.view(3).await, Err(StoreError::NotFound(3))));
    }

    #[test]
    fn search_is_case_insensitive_across_name_email_and_text() {
        let messages = inbox();
        let manager = messages.manager();

        let by_name = manager.query(&Query::search("AKMAL"));
        let by_email = manager.query(&Query::search("COMPANY.UZ"));
        let by_text = manager.query(&Query::search("narxlari"));

        assert_eq!(by_name.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(by_email.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2]);
        assert_eq!(by_text.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2]);
        assert!(manager.query(&Query::search("+998")).is_empty());
    }

    #[test]
    fn status_filter_selects_matching_messages() {
        let messages = inbox();
        let query = Query::default().with_filter("status", FilterValue::parse("new"));
        let visible = messages.manager().query(&query);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].status, MessageStatus::New);
    }
}
