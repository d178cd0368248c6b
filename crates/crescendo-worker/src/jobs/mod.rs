//! The three notification trigger jobs.

pub mod announcement;
pub mod frequency;
pub mod release_day;

pub use announcement::AnnouncementDateTriggerJob;
pub use frequency::FrequencyTriggerJob;
pub use release_day::ReleaseDateTriggerJob;

#[cfg(test)]
pub(crate) mod support {
    //! In-memory fakes shared by the trigger job tests.

    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    use crescendo_core::error::AppError;
    use crescendo_core::result::AppResult;
    use crescendo_core::traits::{
        FollowRepository, NotificationConfigRepository, ReleaseSource, UserRepository,
    };
    use crescendo_core::types::ReleaseWindow;
    use crescendo_entity::notification::{NotificationChannel, NotificationConfig};
    use crescendo_entity::release::{Release, ReleaseState};
    use crescendo_entity::user::User;
    use crescendo_service::notification::sender::NotificationSender;
    use crescendo_service::notification::ChannelDispatcher;
    use crescendo_service::release::ReleaseCollector;

    #[derive(Default)]
    pub struct InMemoryConfigs {
        pub rows: Mutex<Vec<NotificationConfig>>,
    }

    #[async_trait]
    impl NotificationConfigRepository for InMemoryConfigs {
        async fn find_all_active(&self) -> AppResult<Vec<NotificationConfig>> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn find_by_user_and_channel(
            &self,
            user_id: Uuid,
            channel: NotificationChannel,
        ) -> AppResult<Option<NotificationConfig>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.user_id == user_id && c.channel == channel)
                .cloned())
        }

        async fn insert(&self, config: &NotificationConfig) -> AppResult<()> {
            self.rows.lock().unwrap().push(config.clone());
            Ok(())
        }

        async fn update(&self, config: &NotificationConfig) -> AppResult<()> {
            let mut rows = self.rows.lock().unwrap();
            if let Some(row) = rows.iter_mut().find(|c| c.id == config.id) {
                *row = config.clone();
            }
            Ok(())
        }

        async fn advance_last_notification(
            &self,
            config_id: Uuid,
            date: NaiveDate,
        ) -> AppResult<()> {
            let mut rows = self.rows.lock().unwrap();
            if let Some(row) = rows.iter_mut().find(|c| c.id == config_id) {
                row.last_notification_date = Some(date);
            }
            Ok(())
        }

        async fn delete_by_user(&self, user_id: Uuid) -> AppResult<u64> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|c| c.user_id != user_id);
            Ok((before - rows.len()) as u64)
        }
    }

    impl InMemoryConfigs {
        pub fn last_notification_date(&self, config_id: Uuid) -> Option<NaiveDate> {
            self.rows
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.id == config_id)
                .and_then(|c| c.last_notification_date)
        }
    }

    #[derive(Default)]
    pub struct FakeUsers {
        pub rows: Mutex<HashMap<Uuid, User>>,
    }

    #[async_trait]
    impl UserRepository for FakeUsers {
        async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
            Ok(self.rows.lock().unwrap().get(&user_id).cloned())
        }
    }

    #[derive(Default)]
    pub struct FakeFollows {
        pub rows: Mutex<HashMap<Uuid, Vec<String>>>,
    }

    #[async_trait]
    impl FollowRepository for FakeFollows {
        async fn followed_artist_names(&self, user_id: Uuid) -> AppResult<Vec<String>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .get(&user_id)
                .cloned()
                .unwrap_or_default())
        }
    }

    /// Returns the preset releases that fall inside the queried window.
    #[derive(Default)]
    pub struct FakeSource {
        pub releases: Mutex<Vec<Release>>,
    }

    #[async_trait]
    impl ReleaseSource for FakeSource {
        async fn find_releases(
            &self,
            _artist_names: &[String],
            window: ReleaseWindow,
        ) -> AppResult<Vec<Release>> {
            Ok(self
                .releases
                .lock()
                .unwrap()
                .iter()
                .filter(|r| window.contains(r.release_date))
                .cloned()
                .collect())
        }
    }

    /// Records every send; can be told to fail for specific users.
    #[derive(Default)]
    pub struct RecordingSender {
        pub frequency: Mutex<Vec<(Uuid, Vec<Release>, Vec<Release>)>>,
        pub release_day: Mutex<Vec<(Uuid, Vec<Release>)>>,
        pub announcement: Mutex<Vec<(Uuid, Vec<Release>)>>,
        pub fail_for: Mutex<HashSet<Uuid>>,
    }

    impl RecordingSender {
        fn check(&self, user: &User) -> AppResult<()> {
            if self.fail_for.lock().unwrap().contains(&user.id) {
                return Err(AppError::transport("delivery refused"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl NotificationSender for RecordingSender {
        async fn send_frequency_message(
            &self,
            user: &User,
            upcoming: &[Release],
            recent: &[Release],
        ) -> AppResult<()> {
            self.check(user)?;
            self.frequency
                .lock()
                .unwrap()
                .push((user.id, upcoming.to_vec(), recent.to_vec()));
            Ok(())
        }

        async fn send_release_date_message(
            &self,
            user: &User,
            todays: &[Release],
        ) -> AppResult<()> {
            self.check(user)?;
            self.release_day
                .lock()
                .unwrap()
                .push((user.id, todays.to_vec()));
            Ok(())
        }

        async fn send_announcement_date_message(
            &self,
            user: &User,
            todays: &[Release],
        ) -> AppResult<()> {
            self.check(user)?;
            self.announcement
                .lock()
                .unwrap()
                .push((user.id, todays.to_vec()));
            Ok(())
        }
    }

    /// One wired test fixture: repositories, collector, dispatcher, senders.
    pub struct Fixture {
        pub configs: Arc<InMemoryConfigs>,
        pub users: Arc<FakeUsers>,
        pub follows: Arc<FakeFollows>,
        pub source: Arc<FakeSource>,
        pub email_sender: Arc<RecordingSender>,
        pub telegram_sender: Arc<RecordingSender>,
        pub collector: Arc<ReleaseCollector>,
        pub dispatcher: Arc<ChannelDispatcher>,
    }

    impl Fixture {
        pub fn new() -> Self {
            let configs = Arc::new(InMemoryConfigs::default());
            let users = Arc::new(FakeUsers::default());
            let follows = Arc::new(FakeFollows::default());
            let source = Arc::new(FakeSource::default());
            let email_sender = Arc::new(RecordingSender::default());
            let telegram_sender = Arc::new(RecordingSender::default());

            let collector = Arc::new(ReleaseCollector::new(
                Arc::clone(&source) as Arc<dyn ReleaseSource>,
                Arc::clone(&follows) as Arc<dyn FollowRepository>,
            ));
            let dispatcher = Arc::new(ChannelDispatcher::new(
                Arc::clone(&email_sender) as Arc<dyn NotificationSender>,
                Arc::clone(&telegram_sender) as Arc<dyn NotificationSender>,
            ));

            Self {
                configs,
                users,
                follows,
                source,
                email_sender,
                telegram_sender,
                collector,
                dispatcher,
            }
        }

        /// Add an enabled user following the given artists, with one config.
        pub fn add_user(&self, artists: &[&str], config: NotificationConfig) -> Uuid {
            let user_id = config.user_id;
            let now = Utc::now();
            self.users.rows.lock().unwrap().insert(
                user_id,
                User {
                    id: user_id,
                    username: format!("user-{}", &user_id.to_string()[..8]),
                    email: format!("{user_id}@example.org"),
                    enabled: true,
                    created_at: now,
                    updated_at: now,
                },
            );
            self.follows
                .rows
                .lock()
                .unwrap()
                .insert(user_id, artists.iter().map(|a| a.to_string()).collect());
            self.configs.rows.lock().unwrap().push(config);
            user_id
        }

        pub fn add_release(&self, release: Release) {
            self.source.releases.lock().unwrap().push(release);
        }
    }

    pub fn release_in_days(days: i64) -> Release {
        let today = Utc::now().date_naive();
        Release {
            artist: "Opeth".to_string(),
            album_title: format!("Album {days}"),
            release_date: today + chrono::Duration::days(days),
            announcement_date: today,
            state: ReleaseState::Ok,
            reissue: false,
        }
    }

    pub fn email_config(notify: bool, frequency_weeks: i32) -> NotificationConfig {
        let mut config = NotificationConfig::new_default(Uuid::new_v4(), NotificationChannel::Email);
        config.notify = notify;
        config.frequency_weeks = frequency_weeks;
        config
    }
}
