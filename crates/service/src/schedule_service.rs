// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The application service.
//!
//! Orchestrates the pure engine around the stores: load roster → apply a
//! command → replace roster → persist the session cache and, where the
//! lifecycle requires it, the archive. Writes to the primary store are
//! errors when they fail; writes to the mirror are fire-and-forget.

use crate::error::ServiceError;
use crate::requests::{ClearOutcome, GenerateOutcome, SubstitutionRequest};
use crate::session::Session;
use rota::{Command, MonthSchedule, ScheduleState, Transition, apply};
use rota_domain::{
    CleaningGroupId, DutyCategory, FieldServiceMonth, FieldServiceTemplate, ManagedItem, Member,
    MemberId, MidweekProgramMonth, MonthKey, PublicMeetingMonth, RotaConfig, ScheduleStatus,
    validate_roster,
};
use rota_persistence::{
    Mirror, SINGLETON_KEY, SqliteStore, collections, roster as roster_store, schedules,
};
use serde::Serialize;
use std::sync::Arc;
use time::Date;
use tracing::warn;

/// Application service for schedules, the roster, and the ancillary
/// assignment sets.
pub struct ScheduleService {
    store: SqliteStore,
    mirror: Option<Arc<dyn Mirror>>,
    config: RotaConfig,
}

impl ScheduleService {
    /// Creates a service over a primary store with no mirror.
    #[must_use]
    pub const fn new(store: SqliteStore, config: RotaConfig) -> Self {
        Self {
            store,
            mirror: None,
            config,
        }
    }

    /// Creates a service with a best-effort mirror store.
    #[must_use]
    pub fn with_mirror(store: SqliteStore, mirror: Arc<dyn Mirror>, config: RotaConfig) -> Self {
        Self {
            store,
            mirror: Some(mirror),
            config,
        }
    }

    /// Returns the static configuration.
    #[must_use]
    pub const fn config(&self) -> &RotaConfig {
        &self.config
    }

    /// Opens a session, resuming the cached working copy when one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache cannot be read.
    pub fn open_session(&self) -> Result<Session, ServiceError> {
        let cached: Option<MonthSchedule> = self
            .store
            .get(collections::SCHEDULE_CACHE, SINGLETON_KEY)?;
        Ok(Session::with_active(cached))
    }

    // --- Roster -----------------------------------------------------------

    /// Loads the member roster, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub fn roster(&self) -> Result<Vec<Member>, ServiceError> {
        Ok(roster_store::load(&self.store)?)
    }

    /// Validates and replaces the full roster.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the write fails.
    pub fn replace_roster(&self, members: Vec<Member>) -> Result<(), ServiceError> {
        validate_roster(&members)?;
        roster_store::replace(&self.store, &members)?;
        self.mirror_roster(&members);
        Ok(())
    }

    /// Clears one member's assignment history.
    ///
    /// # Errors
    ///
    /// Returns an error if the member is unknown or the write fails.
    pub fn reset_history(&self, member_id: &MemberId) -> Result<(), ServiceError> {
        let mut members = roster_store::load(&self.store)?;
        let Some(member) = members.iter_mut().find(|m| &m.id == member_id) else {
            return Err(ServiceError::DomainViolation(
                rota_domain::DomainError::MemberNotFound(member_id.value().to_string()),
            ));
        };
        member.assignment_history.clear();
        roster_store::replace(&self.store, &members)?;
        self.mirror_roster(&members);
        Ok(())
    }

    // --- Schedule lifecycle ----------------------------------------------

    /// Loads a month from the archive into the session.
    ///
    /// An absent month is not an error: the session is simply left without
    /// an active schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be read.
    pub fn load_month(
        &self,
        session: &mut Session,
        key: MonthKey,
    ) -> Result<Option<ScheduleStatus>, ServiceError> {
        let loaded = schedules::load(&self.store, key)?;
        let status = loaded.as_ref().map(|s| s.status);
        session.set_active(loaded);
        self.persist_cache(session)?;
        Ok(status)
    }

    /// Lists every archived month with its status, in key order.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be read.
    pub fn archived_months(&self) -> Result<Vec<(MonthKey, ScheduleStatus)>, ServiceError> {
        Ok(schedules::load_all(&self.store)?
            .into_iter()
            .map(|s| (s.key, s.status))
            .collect())
    }

    /// Runs the rotation selector for one category of a month.
    ///
    /// The result lands in the session as a draft; the roster's ledger is
    /// rewritten and replaced. Slots the selector could not fill are
    /// reported for manual completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster is empty or a store write fails.
    pub fn generate(
        &self,
        session: &mut Session,
        key: MonthKey,
        category: DutyCategory,
    ) -> Result<GenerateOutcome, ServiceError> {
        let roster = roster_store::load(&self.store)?;
        let state = session.state_for(key);
        let Transition { new_state, roster: updated } = apply(
            &state,
            &roster,
            key,
            Command::Generate { category },
            &self.config,
        )?;

        roster_store::replace(&self.store, &updated)?;
        self.mirror_roster(&updated);

        let schedule = loaded_schedule(new_state)?;
        let unfilled = schedule.unfilled();
        session.set_active(Some(schedule));
        self.persist_cache(session)?;

        Ok(GenerateOutcome { unfilled })
    }

    /// Applies an operator-confirmed manual assignment or substitution to
    /// the active schedule.
    ///
    /// Legal in draft and finalized state; a finalized month is re-archived
    /// under the same key after the edit.
    ///
    /// # Errors
    ///
    /// Returns an error if no schedule is loaded, the engine rejects the
    /// request, or a store write fails.
    pub fn substitute(
        &self,
        session: &mut Session,
        request: SubstitutionRequest,
    ) -> Result<(), ServiceError> {
        let Some(active) = session.active() else {
            return Err(ServiceError::NoActiveSchedule);
        };
        let key = active.key;
        let roster = roster_store::load(&self.store)?;
        let state = ScheduleState::Loaded(active.clone());
        let Transition { new_state, roster: updated } = apply(
            &state,
            &roster,
            key,
            Command::Substitute {
                date: request.date,
                slot: request.slot,
                original_member: request.original_member,
                new_member: request.new_member,
            },
            &self.config,
        )?;

        roster_store::replace(&self.store, &updated)?;
        self.mirror_roster(&updated);

        let schedule = loaded_schedule(new_state)?;
        if schedule.status == ScheduleStatus::Finalized {
            schedules::save(&self.store, &schedule)?;
            self.mirror_schedule(&schedule);
        }
        session.set_active(Some(schedule));
        self.persist_cache(session)?;
        Ok(())
    }

    /// Sets or clears the post-meeting cleaning group of a date on the
    /// active schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if no schedule is loaded, the group is unknown, or
    /// a store write fails.
    pub fn set_post_meeting_cleaning(
        &self,
        session: &mut Session,
        date: Date,
        group: Option<CleaningGroupId>,
    ) -> Result<(), ServiceError> {
        self.apply_cleaning(session, Command::SetPostMeetingCleaning { date, group })
    }

    /// Sets or clears the weekly cleaning responsibility of the week
    /// containing `week` on the active schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if no schedule is loaded or a store write fails.
    pub fn set_weekly_cleaning(
        &self,
        session: &mut Session,
        week: Date,
        responsible: String,
    ) -> Result<(), ServiceError> {
        self.apply_cleaning(session, Command::SetWeeklyCleaning { week, responsible })
    }

    fn apply_cleaning(&self, session: &mut Session, command: Command) -> Result<(), ServiceError> {
        let Some(active) = session.active() else {
            return Err(ServiceError::NoActiveSchedule);
        };
        let key = active.key;
        let state = ScheduleState::Loaded(active.clone());
        // Cleaning edits never touch the ledger; the roster passes through.
        let Transition { new_state, .. } = apply(&state, &[], key, command, &self.config)?;

        let schedule = loaded_schedule(new_state)?;
        if schedule.status == ScheduleStatus::Finalized {
            schedules::save(&self.store, &schedule)?;
            self.mirror_schedule(&schedule);
        }
        session.set_active(Some(schedule));
        self.persist_cache(session)?;
        Ok(())
    }

    /// Saves the active schedule to the archive without finalizing it.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NothingToSave` when no schedule is loaded, or
    /// a persistence error if the write fails.
    pub fn save_progress(&self, session: &Session) -> Result<(), ServiceError> {
        let Some(active) = session.active() else {
            return Err(ServiceError::NothingToSave);
        };
        schedules::save(&self.store, active)?;
        self.mirror_schedule(active);
        Ok(())
    }

    /// Finalizes the active schedule and archives it.
    ///
    /// # Errors
    ///
    /// Returns an error if no schedule is loaded, blank entries remain, the
    /// month is already finalized, or a store write fails.
    pub fn finalize(&self, session: &mut Session) -> Result<(), ServiceError> {
        let Some(active) = session.active() else {
            return Err(ServiceError::NoActiveSchedule);
        };
        let key = active.key;
        let state = ScheduleState::Loaded(active.clone());
        let Transition { new_state, .. } = apply(&state, &[], key, Command::Finalize, &self.config)?;

        let schedule = loaded_schedule(new_state)?;
        schedules::save(&self.store, &schedule)?;
        self.mirror_schedule(&schedule);
        session.set_active(Some(schedule));
        self.persist_cache(session)?;
        Ok(())
    }

    /// Removes a month from the archive.
    ///
    /// A missing month is reported as `NothingToClear`, not an error; the
    /// session is reset either way when it held that month.
    ///
    /// # Errors
    ///
    /// Returns an error if a store operation fails.
    pub fn clear_month(
        &self,
        session: &mut Session,
        key: MonthKey,
    ) -> Result<ClearOutcome, ServiceError> {
        let removed = schedules::delete(&self.store, key)?;
        self.mirror_remove(collections::SCHEDULES, key.to_string());

        if session.is_active(key) {
            session.set_active(None);
            self.persist_cache(session)?;
        }

        Ok(if removed {
            ClearOutcome::Removed
        } else {
            ClearOutcome::NothingToClear
        })
    }

    /// Cascading clear of every persisted collection, the mirror, and the
    /// session.
    ///
    /// # Errors
    ///
    /// Returns an error if a primary-store wipe fails.
    pub fn clear_all_data(&self, session: &mut Session) -> Result<(), ServiceError> {
        for collection in collections::ALL {
            self.store.wipe(collection)?;
            self.mirror_wipe(collection);
        }
        session.set_active(None);
        Ok(())
    }

    // --- Ancillary assignment sets ---------------------------------------

    /// Saves one month of public-meeting assignments.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save_public_meeting_month(
        &self,
        key: MonthKey,
        data: &PublicMeetingMonth,
    ) -> Result<(), ServiceError> {
        self.save_month_doc(collections::PUBLIC_MEETINGS, key, data)
    }

    /// Loads one month of public-meeting assignments.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub fn load_public_meeting_month(
        &self,
        key: MonthKey,
    ) -> Result<Option<PublicMeetingMonth>, ServiceError> {
        Ok(self
            .store
            .get(collections::PUBLIC_MEETINGS, &key.to_string())?)
    }

    /// Removes one month of public-meeting assignments.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn clear_public_meeting_month(&self, key: MonthKey) -> Result<ClearOutcome, ServiceError> {
        self.clear_month_doc(collections::PUBLIC_MEETINGS, key)
    }

    /// Saves one month of midweek programs.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save_midweek_program_month(
        &self,
        key: MonthKey,
        data: &MidweekProgramMonth,
    ) -> Result<(), ServiceError> {
        self.save_month_doc(collections::MIDWEEK_PROGRAMS, key, data)
    }

    /// Loads one month of midweek programs.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub fn load_midweek_program_month(
        &self,
        key: MonthKey,
    ) -> Result<Option<MidweekProgramMonth>, ServiceError> {
        Ok(self
            .store
            .get(collections::MIDWEEK_PROGRAMS, &key.to_string())?)
    }

    /// Removes one month of midweek programs.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn clear_midweek_program_month(&self, key: MonthKey) -> Result<ClearOutcome, ServiceError> {
        self.clear_month_doc(collections::MIDWEEK_PROGRAMS, key)
    }

    /// Saves one month of field-service meeting points.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save_field_service_month(
        &self,
        key: MonthKey,
        data: &FieldServiceMonth,
    ) -> Result<(), ServiceError> {
        self.save_month_doc(collections::FIELD_SERVICE, key, data)
    }

    /// Loads one month of field-service meeting points.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub fn load_field_service_month(
        &self,
        key: MonthKey,
    ) -> Result<Option<FieldServiceMonth>, ServiceError> {
        Ok(self.store.get(collections::FIELD_SERVICE, &key.to_string())?)
    }

    /// Removes one month of field-service meeting points.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn clear_field_service_month(&self, key: MonthKey) -> Result<ClearOutcome, ServiceError> {
        self.clear_month_doc(collections::FIELD_SERVICE, key)
    }

    /// Saves the field-service weekly template.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save_field_service_template(
        &self,
        template: &FieldServiceTemplate,
    ) -> Result<(), ServiceError> {
        self.save_singleton(collections::FIELD_SERVICE_TEMPLATE, template)
    }

    /// Loads the field-service weekly template.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub fn load_field_service_template(
        &self,
    ) -> Result<Option<FieldServiceTemplate>, ServiceError> {
        Ok(self
            .store
            .get(collections::FIELD_SERVICE_TEMPLATE, SINGLETON_KEY)?)
    }

    /// Saves the managed field-service modality list.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save_modalities(&self, items: &[ManagedItem]) -> Result<(), ServiceError> {
        self.save_singleton(collections::FIELD_SERVICE_MODALITIES, &items.to_vec())
    }

    /// Loads the managed field-service modality list.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub fn load_modalities(&self) -> Result<Vec<ManagedItem>, ServiceError> {
        self.load_managed_list(collections::FIELD_SERVICE_MODALITIES)
    }

    /// Saves the managed field-service base location list.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save_locations(&self, items: &[ManagedItem]) -> Result<(), ServiceError> {
        self.save_singleton(collections::FIELD_SERVICE_LOCATIONS, &items.to_vec())
    }

    /// Loads the managed field-service base location list.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub fn load_locations(&self) -> Result<Vec<ManagedItem>, ServiceError> {
        self.load_managed_list(collections::FIELD_SERVICE_LOCATIONS)
    }

    fn clear_month_doc(
        &self,
        collection: &'static str,
        key: MonthKey,
    ) -> Result<ClearOutcome, ServiceError> {
        let removed = self.store.delete(collection, &key.to_string())?;
        self.mirror_remove(collection, key.to_string());
        Ok(if removed {
            ClearOutcome::Removed
        } else {
            ClearOutcome::NothingToClear
        })
    }

    fn load_managed_list(&self, collection: &str) -> Result<Vec<ManagedItem>, ServiceError> {
        let mut items: Vec<ManagedItem> = self
            .store
            .get(collection, SINGLETON_KEY)?
            .unwrap_or_default();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    // --- Persistence plumbing --------------------------------------------

    fn persist_cache(&self, session: &Session) -> Result<(), ServiceError> {
        match session.active() {
            Some(schedule) => {
                self.store
                    .put(collections::SCHEDULE_CACHE, SINGLETON_KEY, schedule)?;
            }
            None => {
                self.store
                    .delete(collections::SCHEDULE_CACHE, SINGLETON_KEY)?;
            }
        }
        Ok(())
    }

    fn save_month_doc<T: Serialize>(
        &self,
        collection: &'static str,
        key: MonthKey,
        data: &T,
    ) -> Result<(), ServiceError> {
        self.store.put(collection, &key.to_string(), data)?;
        self.mirror_upsert(collection, key.to_string(), data);
        Ok(())
    }

    fn save_singleton<T: Serialize>(
        &self,
        collection: &'static str,
        data: &T,
    ) -> Result<(), ServiceError> {
        self.store.put(collection, SINGLETON_KEY, data)?;
        self.mirror_upsert(collection, SINGLETON_KEY.to_string(), data);
        Ok(())
    }

    fn mirror_schedule(&self, schedule: &MonthSchedule) {
        self.mirror_upsert(collections::SCHEDULES, schedule.key.to_string(), schedule);
    }

    fn mirror_roster(&self, members: &[Member]) {
        let Some(mirror) = &self.mirror else { return };
        let mut documents: Vec<(String, serde_json::Value)> = Vec::with_capacity(members.len());
        for member in members {
            match serde_json::to_value(member) {
                Ok(body) => documents.push((member.id.value().to_string(), body)),
                Err(err) => {
                    warn!("Mirror serialization for member '{}' failed: {err}", member.id);
                    return;
                }
            }
        }
        let mirror = Arc::clone(mirror);
        std::thread::spawn(move || {
            if let Err(err) = mirror.wipe(collections::MEMBERS) {
                warn!("Mirror wipe of members failed: {err}");
                return;
            }
            for (key, body) in documents {
                if let Err(err) = mirror.upsert(collections::MEMBERS, &key, &body) {
                    warn!("Mirror write for members/{key} failed: {err}");
                }
            }
        });
    }

    fn mirror_upsert<T: Serialize>(&self, collection: &'static str, key: String, value: &T) {
        let Some(mirror) = &self.mirror else { return };
        match serde_json::to_value(value) {
            Ok(body) => {
                let mirror = Arc::clone(mirror);
                std::thread::spawn(move || {
                    if let Err(err) = mirror.upsert(collection, &key, &body) {
                        warn!("Mirror write for {collection}/{key} failed: {err}");
                    }
                });
            }
            Err(err) => warn!("Mirror serialization for {collection}/{key} failed: {err}"),
        }
    }

    fn mirror_remove(&self, collection: &'static str, key: String) {
        let Some(mirror) = &self.mirror else { return };
        let mirror = Arc::clone(mirror);
        std::thread::spawn(move || {
            if let Err(err) = mirror.remove(collection, &key) {
                warn!("Mirror removal of {collection}/{key} failed: {err}");
            }
        });
    }

    fn mirror_wipe(&self, collection: &'static str) {
        let Some(mirror) = &self.mirror else { return };
        let mirror = Arc::clone(mirror);
        std::thread::spawn(move || {
            if let Err(err) = mirror.wipe(collection) {
                warn!("Mirror wipe of {collection} failed: {err}");
            }
        });
    }
}

fn loaded_schedule(state: ScheduleState) -> Result<MonthSchedule, ServiceError> {
    match state {
        ScheduleState::Loaded(schedule) => Ok(schedule),
        ScheduleState::Absent => Err(ServiceError::Internal(String::from(
            "engine transition produced no schedule",
        ))),
    }
}
