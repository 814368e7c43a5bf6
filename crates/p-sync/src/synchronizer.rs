//! The theme synchronizer.
//!
//! One [`Synchronizer`] owns the palette and the display mode for a page
//! session. It keeps the style root and durable storage in step with that
//! state, and runs accessibility passes against what the root carries.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ──attach()──▶ Hydrating ──▶ Ready ◀──▶ Mutating
//!   (defaults)                (read store)   (projected + persisted)
//! ```
//!
//! A fresh synchronizer already holds the default palette, so reads never
//! see an empty theme. Mutations made before [`Synchronizer::attach`] stay in
//! memory. Attaching hydrates from storage (a stored snapshot wins), then
//! projects and persists. Every later mutation passes through `Mutating`
//! and re-projects and re-persists before returning to `Ready`.
//!
//! Storage failures never escape the mutation API. They are logged and the
//! in-memory state stays authoritative.
//!
//! # Monitoring
//!
//! [`Synchronizer::start_monitoring`] registers an observer for `style` and
//! `class` changes on the root and runs an initial validation pass that
//! notifies the callbacks. [`Synchronizer::process_mutations`] drains
//! its queue and, if anything changed, revalidates and notifies every
//! callback registered with [`Synchronizer::on_validation`]. Start and stop
//! are idempotent. [`Synchronizer::monitor`] wraps the pair in a guard that
//! stops monitoring when dropped.

use std::fmt;
use std::ops::{Deref, DerefMut};

use p_color::ColorToken;
use p_theme::builtin::default_palette;
use p_theme::css::css_custom_properties;
use p_theme::validate::RulePatch;
use p_theme::{
    ColorPath, PalettePatch, ThemePalette, ValidationResult, ValidationRule, ValidationSummary,
    validate_rule_set,
};
use tracing::{debug, info, info_span, warn};

use crate::SyncError;
use crate::config::SyncConfig;
use crate::document::{AttributeFilter, Computed, ObserverId, StyleRoot};
use crate::mode::Mode;
use crate::storage::{ThemeSnapshot, ThemeStorage};

/// Where the synchronizer is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Holding defaults, nothing projected or persisted yet.
    Uninitialized,
    /// Reading the stored snapshot.
    Hydrating,
    /// State settled and projected.
    Ready,
    /// Inside a palette or mode update.
    Mutating,
}

/// Handle for a validation callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&[ValidationResult])>;

// ---------------------------------------------------------------------------
// Synchronizer
// ---------------------------------------------------------------------------

/// Single owner of the live theme.
pub struct Synchronizer<S, R> {
    config: SyncConfig,
    palette: ThemePalette,
    mode: Mode,
    phase: Phase,
    storage: S,
    root: R,
    observer: Option<ObserverId>,
    callbacks: Vec<(SubscriptionId, Callback)>,
    next_subscription: u64,
}

impl<S: ThemeStorage, R: StyleRoot> Synchronizer<S, R> {
    /// A synchronizer with the default configuration.
    #[must_use]
    pub fn new(storage: S, root: R) -> Self {
        Self::with_config(SyncConfig::default(), storage, root)
    }

    #[must_use]
    pub fn with_config(config: SyncConfig, storage: S, root: R) -> Self {
        Self {
            mode: config.default_mode,
            config,
            palette: default_palette(),
            phase: Phase::Uninitialized,
            storage,
            root,
            observer: None,
            callbacks: Vec::new(),
            next_subscription: 0,
        }
    }

    // ── Accessors ──

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub const fn palette(&self) -> &ThemePalette {
        &self.palette
    }

    #[must_use]
    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub const fn root(&self) -> &R {
        &self.root
    }

    /// Mutable access to the root, for writes the synchronizer does not own
    /// (stylesheet overrides, other scripts).
    pub const fn root_mut(&mut self) -> &mut R {
        &mut self.root
    }

    /// Give back the storage and root.
    pub fn into_parts(mut self) -> (S, R) {
        self.stop_monitoring();
        (self.storage, self.root)
    }

    /// The palette color at `path` (`"primary.900"`, `"accent-cyan"`),
    /// or `#000000` with a warning if the path names no slot.
    #[must_use]
    pub fn color(&self, path: &str) -> ColorToken {
        match path.parse::<ColorPath>() {
            Ok(path) => self.palette.get(path).clone(),
            Err(err) => {
                warn!(error = %err, "unknown palette path, using fallback");
                ColorToken::black()
            }
        }
    }

    /// The value of a custom property as the root currently carries it.
    #[must_use]
    pub fn css_property(&self, name: &str) -> Option<String> {
        self.root.property(name)
    }

    // ── Lifecycle ──

    /// Hydrate from storage, project, and persist. Only the first call does
    /// anything.
    pub fn attach(&mut self) {
        if self.phase != Phase::Uninitialized {
            return;
        }
        self.phase = Phase::Hydrating;
        self.hydrate();
        self.commit();
        self.phase = Phase::Ready;
    }

    fn hydrate(&mut self) {
        let key = self.config.storage_key.as_str();
        match ThemeSnapshot::load(&self.storage, key) {
            Ok(Some(snapshot)) => {
                debug!(key, mode = %snapshot.theme, "hydrated theme from storage");
                self.mode = snapshot.theme;
                if let Some(colors) = snapshot.colors {
                    self.palette = colors;
                }
            }
            Ok(None) => debug!(key, "no stored theme"),
            Err(err) => warn!(key, error = %err, "failed to load stored theme, keeping defaults"),
        }
    }

    /// Write every custom property and the mode marker to the root.
    fn project(&mut self) {
        for (name, value) in css_custom_properties(&self.palette) {
            self.root.set_property(&name, &value);
        }
        self.root.remove_class(self.mode.toggled().class());
        self.root.add_class(self.mode.class());
    }

    fn commit(&mut self) {
        self.project();
        if let Err(err) = self.save() {
            warn!(key = %self.config.storage_key, error = %err, "failed to persist theme");
        }
    }

    /// Persist the current palette and mode now.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`SyncError`] if the write fails.
    pub fn save(&mut self) -> Result<(), SyncError> {
        let snapshot = ThemeSnapshot { theme: self.mode, colors: Some(self.palette.clone()) };
        snapshot.save(&mut self.storage, &self.config.storage_key)
    }

    /// Remove the persisted snapshot. In-memory state and the root are
    /// untouched until the next mutation writes a fresh snapshot.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`SyncError`] if the removal fails.
    pub fn clear_storage(&mut self) -> Result<(), SyncError> {
        self.storage.remove(&self.config.storage_key)
    }

    fn mutate(&mut self, f: impl FnOnce(&mut Self)) {
        if self.phase == Phase::Uninitialized {
            f(self);
            return;
        }
        self.phase = Phase::Mutating;
        f(self);
        self.commit();
        self.phase = Phase::Ready;
    }

    // ── Mutations ──

    /// Merge `patch` into the palette key by key.
    pub fn update_colors(&mut self, patch: &PalettePatch) {
        debug!(changes = patch.len(), "updating colors");
        self.mutate(|s| s.palette.apply(patch));
    }

    /// Restore the compiled-in palette. The mode is kept.
    pub fn reset_colors(&mut self) {
        debug!("resetting colors");
        self.mutate(|s| s.palette = default_palette());
    }

    /// Flip between light and dark.
    pub fn toggle_theme(&mut self) {
        let mode = self.mode.toggled();
        self.set_mode(mode);
    }

    pub fn set_mode(&mut self, mode: Mode) {
        debug!(%mode, "setting mode");
        self.mutate(|s| s.mode = mode);
    }

    // ── Rules ──

    #[must_use]
    pub fn rules(&self) -> &[ValidationRule] {
        &self.config.rules
    }

    /// Add a rule, replacing any rule with the same id in place.
    pub fn add_rule(&mut self, rule: ValidationRule) -> Option<ValidationRule> {
        match self.config.rules.iter_mut().find(|r| r.id == rule.id) {
            Some(existing) => Some(std::mem::replace(existing, rule)),
            None => {
                self.config.rules.push(rule);
                None
            }
        }
    }

    pub fn remove_rule(&mut self, id: &str) -> Option<ValidationRule> {
        let index = self.config.rules.iter().position(|r| r.id == id)?;
        Some(self.config.rules.remove(index))
    }

    /// Apply `patch` to the rule with `id`. Returns `false` if there is none.
    pub fn update_rule(&mut self, id: &str, patch: RulePatch) -> bool {
        match self.config.rules.iter_mut().find(|r| r.id == id) {
            Some(rule) => {
                rule.apply(patch);
                true
            }
            None => false,
        }
    }

    // ── Validation ──

    /// Run every rule against the colors the root currently carries.
    ///
    /// Before attachment nothing has been projected, so the in-memory
    /// palette stands in for the root.
    #[must_use]
    pub fn validate_accessibility(&self) -> Vec<ValidationResult> {
        let span = info_span!("accessibility", rules = self.config.rules.len());
        let _enter = span.enter();

        let results: Vec<ValidationResult> = if self.phase == Phase::Uninitialized {
            validate_rule_set(&self.config.rules, &self.palette).collect()
        } else {
            validate_rule_set(&self.config.rules, &Computed(&self.root)).collect()
        };

        for result in &results {
            debug!(
                rule = %result.rule.id,
                foreground = %result.foreground,
                background = %result.background,
                ratio = result.ratio,
                level = %result.level,
                "checked"
            );
        }

        let summary = ValidationSummary::from_results(&results);
        if summary.is_valid {
            info!(total = summary.total, percentage = summary.percentage, "all contrast checks passed");
        } else {
            warn!(
                total = summary.total,
                passed = summary.passed,
                failed = summary.failed,
                percentage = summary.percentage,
                "contrast checks failed"
            );
        }
        results
    }

    /// Register a callback for monitoring passes.
    pub fn on_validation(&mut self, callback: impl FnMut(&[ValidationResult]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Drop a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sub, _)| *sub != id);
        self.callbacks.len() != before
    }

    /// Validate and hand the results to every callback.
    #[must_use]
    pub fn validate_and_notify(&mut self) -> Vec<ValidationResult> {
        let results = self.validate_accessibility();
        for (_, callback) in &mut self.callbacks {
            callback(&results);
        }
        results
    }

    // ── Monitoring ──

    #[must_use]
    pub const fn is_monitoring(&self) -> bool {
        self.observer.is_some()
    }

    /// Begin watching the root and run one validation pass right away, so
    /// callbacks see the current state. A second call while active does
    /// nothing.
    pub fn start_monitoring(&mut self) {
        if self.observer.is_none() {
            let id = self.root.observe(AttributeFilter::STYLE | AttributeFilter::CLASS);
            self.observer = Some(id);
            info!("accessibility monitoring started");
            let _ = self.validate_and_notify();
        }
    }

    /// Stop watching the root. Safe to call when not monitoring.
    pub fn stop_monitoring(&mut self) {
        if let Some(id) = self.observer.take() {
            self.root.disconnect(id);
            info!("accessibility monitoring stopped");
        }
    }

    /// Drain pending root changes. If there were any, revalidate, notify
    /// callbacks, and return the results.
    pub fn process_mutations(&mut self) -> Option<Vec<ValidationResult>> {
        let id = self.observer?;
        let records = self.root.take_records(id);
        if records.is_empty() {
            return None;
        }
        debug!(records = records.len(), "root changed, revalidating");
        Some(self.validate_and_notify())
    }

    /// Start monitoring for the lifetime of the returned guard.
    ///
    /// Monitoring that was already running when the guard was created is
    /// left running when it drops.
    #[must_use]
    pub fn monitor(&mut self) -> MonitorGuard<'_, S, R> {
        let started = !self.is_monitoring();
        self.start_monitoring();
        MonitorGuard { sync: self, started }
    }
}

impl<S, R> fmt::Debug for Synchronizer<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Synchronizer")
            .field("phase", &self.phase)
            .field("mode", &self.mode)
            .field("storage_key", &self.config.storage_key)
            .field("rules", &self.config.rules.len())
            .field("monitoring", &self.observer.is_some())
            .field("callbacks", &self.callbacks.len())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// MonitorGuard
// ---------------------------------------------------------------------------

/// Scoped monitoring. Derefs to the synchronizer.
pub struct MonitorGuard<'a, S: ThemeStorage, R: StyleRoot> {
    sync: &'a mut Synchronizer<S, R>,
    started: bool,
}

impl<S: ThemeStorage, R: StyleRoot> Deref for MonitorGuard<'_, S, R> {
    type Target = Synchronizer<S, R>;

    fn deref(&self) -> &Self::Target {
        self.sync
    }
}

impl<S: ThemeStorage, R: StyleRoot> DerefMut for MonitorGuard<'_, S, R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.sync
    }
}

impl<S: ThemeStorage, R: StyleRoot> Drop for MonitorGuard<'_, S, R> {
    fn drop(&mut self) {
        if self.started {
            self.sync.stop_monitoring();
        }
    }
}
