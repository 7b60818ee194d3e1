use chrono::NaiveDate;
use classdesk_core::errors::{DeskError, DeskResult};
use classdesk_core::forms::{AnnouncementForm, AssignmentForm, ChangeRequestForm, ClassForm};
use classdesk_core::models::{
    Announcement, Assignment, AttendanceStatus, ChangeRequest, ClassSession, Role, User,
};
use std::fmt;
use std::str::FromStr;

use super::{apply_fetch, parse_tab, Listing, NO_ANNOUNCEMENTS, NO_ASSIGNMENTS, NO_CLASSES_ASSIGNED, NO_STUDENTS};
use crate::api::ResourceApi;
use crate::workflows::attendance::AttendanceDraft;
use crate::workflows::{announcements, assignments, requests, scheduling, users};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TutorTab {
    #[default]
    Schedule,
    Assignments,
    Announcements,
}

const TUTOR_TABS: [(&str, TutorTab); 3] = [
    ("schedule", TutorTab::Schedule),
    ("assignments", TutorTab::Assignments),
    ("announcements", TutorTab::Announcements),
];

impl FromStr for TutorTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_tab(s, &TUTOR_TABS)
    }
}

impl fmt::Display for TutorTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = TUTOR_TABS
            .iter()
            .find(|(_, tab)| tab == self)
            .map_or("schedule", |(name, _)| *name);
        f.write_str(name)
    }
}

/// The tutor's working view: their classes, the roster, and the attendance draft for the selected
/// class.
#[derive(Debug, Clone)]
pub struct TutorDashboard {
    pub user: User,
    pub tab: TutorTab,
    classes: Vec<ClassSession>,
    students: Vec<User>,
    other_tutors: Vec<User>,
    assignments: Vec<Assignment>,
    announcements: Vec<Announcement>,
    selected_class: Option<String>,
    draft: AttendanceDraft,
}

impl TutorDashboard {
    pub fn new(user: User) -> DeskResult<Self> {
        if !user.is_tutor() {
            return Err(DeskError::Authorization(
                "The tutor dashboard is only available to tutors".to_string(),
            ));
        }
        Ok(Self {
            user,
            tab: TutorTab::default(),
            classes: Vec::new(),
            students: Vec::new(),
            other_tutors: Vec::new(),
            assignments: Vec::new(),
            announcements: Vec::new(),
            selected_class: None,
            draft: AttendanceDraft::new(),
        })
    }

    pub async fn refresh(&mut self, api: &dyn ResourceApi) {
        let (classes, all_users, all_assignments, all_announcements) = tokio::join!(
            api.list_classes(),
            api.list_users(),
            api.list_assignments(),
            api.list_announcements(),
        );

        let tutor_id = self.user.id.clone();
        apply_fetch(
            &mut self.classes,
            classes.map(|classes| scheduling::classes_for_tutor(&classes, &tutor_id)),
            "classes",
        );
        if let Ok(all_users) = &all_users {
            self.other_tutors = requests::swap_candidates(all_users, &tutor_id)
                .into_iter()
                .cloned()
                .collect();
        }
        apply_fetch(
            &mut self.students,
            all_users.map(|all| users::with_role(&all, Role::Student)),
            "users",
        );
        apply_fetch(
            &mut self.assignments,
            all_assignments.map(|all| assignments::assignments_by_tutor(&all, &tutor_id)),
            "assignments",
        );
        apply_fetch(
            &mut self.announcements,
            all_announcements.map(|all| announcements::visible_to(&all, Role::Tutor)),
            "announcements",
        );
    }

    pub fn schedule(&self) -> Listing<'_, ClassSession> {
        Listing::of(&self.classes, NO_CLASSES_ASSIGNED)
    }

    pub fn students(&self) -> Listing<'_, User> {
        Listing::of(&self.students, NO_STUDENTS)
    }

    /// Tutors a swap request could name.
    pub fn swap_candidates(&self) -> &[User] {
        &self.other_tutors
    }

    pub fn assignments(&self) -> Listing<'_, Assignment> {
        Listing::of(&self.assignments, NO_ASSIGNMENTS)
    }

    pub fn announcements(&self) -> Listing<'_, Announcement> {
        Listing::of(&self.announcements, NO_ANNOUNCEMENTS)
    }

    /// Selects one of the tutor's own classes for attendance, requests and assignments.
    pub fn select_class(&mut self, class_id: &str) -> DeskResult<&ClassSession> {
        let index = self
            .classes
            .iter()
            .position(|class| class.id == class_id)
            .ok_or_else(|| DeskError::NotFound(format!("Class {class_id} is not one of your classes")))?;
        self.selected_class = Some(class_id.to_string());
        self.draft.select_class(class_id);
        Ok(&self.classes[index])
    }

    pub fn selected_class(&self) -> Option<&ClassSession> {
        let id = self.selected_class.as_deref()?;
        scheduling::find_class(&self.classes, id)
    }

    pub fn draft(&self) -> &AttendanceDraft {
        &self.draft
    }

    pub fn mark(&mut self, student_id: &str, status: AttendanceStatus) -> bool {
        self.draft.mark_local(student_id, status)
    }

    pub async fn save_attendance(&self, api: &dyn ResourceApi, date: NaiveDate) -> DeskResult<usize> {
        self.draft.commit(api, date).await
    }

    pub async fn submit_request(
        &self,
        api: &dyn ResourceApi,
        form: ChangeRequestForm,
    ) -> DeskResult<ChangeRequest> {
        requests::submit_request(api, &self.user, self.selected_class(), form).await
    }

    pub async fn create_assignment(
        &mut self,
        api: &dyn ResourceApi,
        form: AssignmentForm,
    ) -> DeskResult<Assignment> {
        let created = assignments::create_assignment(api, &self.user, self.selected_class(), form).await?;
        let tutor_id = self.user.id.clone();
        apply_fetch(
            &mut self.assignments,
            api.list_assignments()
                .await
                .map(|all| assignments::assignments_by_tutor(&all, &tutor_id)),
            "assignments",
        );
        Ok(created)
    }

    pub async fn schedule_class(&mut self, api: &dyn ResourceApi, form: ClassForm) -> DeskResult<ClassSession> {
        let created = scheduling::schedule_class(api, &self.user, form).await?;
        let tutor_id = self.user.id.clone();
        apply_fetch(
            &mut self.classes,
            api.list_classes()
                .await
                .map(|classes| scheduling::classes_for_tutor(&classes, &tutor_id)),
            "classes",
        );
        Ok(created)
    }

    pub async fn post_announcement(
        &mut self,
        api: &dyn ResourceApi,
        form: AnnouncementForm,
    ) -> DeskResult<Announcement> {
        let created = announcements::post_announcement(api, &self.user, form).await?;
        apply_fetch(
            &mut self.announcements,
            api.list_announcements()
                .await
                .map(|all| announcements::visible_to(&all, Role::Tutor)),
            "announcements",
        );
        Ok(created)
    }
}
