use classdesk_core::errors::{DeskError, DeskResult};
use classdesk_core::forms::AcademicMarkForm;
use classdesk_core::models::{Announcement, Assignment, ClassSession, PerformanceRecord, Role, StudentProfile, User};
use std::fmt;
use std::str::FromStr;
use tracing::error;

use super::{apply_fetch, parse_tab, Listing, NO_ANNOUNCEMENTS, NO_ASSIGNMENTS, NO_CLASSES_SCHEDULED};
use crate::api::ResourceApi;
use crate::workflows::performance::{self, PerformanceBook};
use crate::workflows::{announcements, scheduling, users};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudentTab {
    #[default]
    Schedule,
    Profile,
    Performance,
    Academic,
    Assignments,
    Announcements,
}

const STUDENT_TABS: [(&str, StudentTab); 6] = [
    ("schedule", StudentTab::Schedule),
    ("profile", StudentTab::Profile),
    ("performance", StudentTab::Performance),
    ("academic", StudentTab::Academic),
    ("assignments", StudentTab::Assignments),
    ("announcements", StudentTab::Announcements),
];

impl FromStr for StudentTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_tab(s, &STUDENT_TABS)
    }
}

impl fmt::Display for StudentTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = STUDENT_TABS
            .iter()
            .find(|(_, tab)| tab == self)
            .map_or("schedule", |(name, _)| *name);
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct StudentDashboard {
    pub user: User,
    pub tab: StudentTab,
    classes: Vec<ClassSession>,
    book: PerformanceBook,
    assignments: Vec<Assignment>,
    announcements: Vec<Announcement>,
}

impl StudentDashboard {
    pub fn new(user: User) -> DeskResult<Self> {
        if !user.is_student() {
            return Err(DeskError::Authorization(
                "The student dashboard is only available to students".to_string(),
            ));
        }
        Ok(Self {
            user,
            tab: StudentTab::default(),
            classes: Vec::new(),
            book: PerformanceBook::default(),
            assignments: Vec::new(),
            announcements: Vec::new(),
        })
    }

    pub async fn refresh(&mut self, api: &dyn ResourceApi) {
        let (classes, book, assignments, all_announcements) = tokio::join!(
            api.list_classes(),
            performance::fetch_student_book(api, &self.user.id),
            api.list_assignments(),
            api.list_announcements(),
        );

        if apply_fetch(&mut self.classes, classes, "classes") {
            scheduling::sort_newest_first(&mut self.classes);
        }
        self.apply_book(book);
        apply_fetch(&mut self.assignments, assignments, "assignments");
        apply_fetch(
            &mut self.announcements,
            all_announcements.map(|all| announcements::visible_to(&all, Role::Student)),
            "announcements",
        );
    }

    fn apply_book(&mut self, book: DeskResult<PerformanceBook>) {
        match book {
            Ok(book) => self.book = book,
            Err(e) => error!("Failed to fetch performance: {}", e),
        }
    }

    pub fn schedule(&self) -> Listing<'_, ClassSession> {
        Listing::of(&self.classes, NO_CLASSES_SCHEDULED)
    }

    pub fn profile(&self) -> &StudentProfile {
        &self.user.profile
    }

    pub fn performance_notes(&self) -> Listing<'_, PerformanceRecord> {
        self.book.notes_listing()
    }

    pub fn academic_marks(&self) -> Listing<'_, PerformanceRecord> {
        self.book.academic_listing()
    }

    pub fn assignments(&self) -> Listing<'_, Assignment> {
        Listing::of(&self.assignments, NO_ASSIGNMENTS)
    }

    pub fn announcements(&self) -> Listing<'_, Announcement> {
        Listing::of(&self.announcements, NO_ANNOUNCEMENTS)
    }

    /// Saves profile edits, then reloads the student's own record.
    pub async fn update_profile(&mut self, api: &dyn ResourceApi, profile: &StudentProfile) -> DeskResult<&User> {
        users::update_own_profile(api, &self.user, profile).await?;
        match users::find_user(api, &self.user.id).await {
            Ok(mut user) => {
                user.password = None;
                self.user = user;
            }
            Err(e) => error!("Failed to reload profile: {}", e),
        }
        Ok(&self.user)
    }

    pub async fn add_academic_mark(
        &mut self,
        api: &dyn ResourceApi,
        form: AcademicMarkForm,
    ) -> DeskResult<PerformanceRecord> {
        let created = performance::add_academic_mark(api, &self.user, form).await?;
        let book = performance::fetch_student_book(api, &self.user.id).await;
        self.apply_book(book);
        Ok(created)
    }
}
