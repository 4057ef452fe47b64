//! Dashboard state and its pure reducer: `(state, action) -> effects`.
//!
//! The reducer never touches storage. Anything that has to leave the process
//! (saving bookmarks, saving the theme, showing a toast, redrawing a view) is
//! returned as an [`Effect`] and carried out by [`crate::core::engine::DashboardEngine`].

use crate::core::compare::{compare, Comparison};
use crate::core::generator::{generate_on, normalize_domain};
use crate::domain::model::{Bookmark, Section, Theme, Toast};
use crate::utils::error::SiteMetricsError;
use crate::utils::validation::validate_website_input;
use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub theme: Theme,
    pub section: Section,
    pub current_website: Option<String>,
    pub fab_open: bool,
    pub bookmarks: Vec<Bookmark>,
    pub comparison: Option<Comparison>,
}

impl DashboardState {
    pub fn new(theme: Theme, bookmarks: Vec<Bookmark>) -> Self {
        Self {
            theme,
            bookmarks,
            ..Self::default()
        }
    }

    pub fn is_bookmarked(&self, domain: &str) -> bool {
        self.bookmarks.iter().any(|b| b.domain == domain)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ToggleTheme,
    ShowSection(Section),
    /// Raw text from the search box.
    Search(String),
    /// `?website=` deep link, normalized but not validated.
    OpenFromQuery(String),
    Compare { website_a: String, website_b: String },
    BookmarkCurrent { saved_at: DateTime<Utc> },
    RemoveBookmark(String),
    ViewBookmark(String),
    Share,
    ToggleFab,
    DismissFab,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Toast(Toast),
    PersistBookmarks,
    PersistTheme,
    RenderAnalytics(String),
    RenderBookmarks,
    RenderComparison,
    Share { website: Option<String> },
}

#[derive(Debug, Default)]
pub struct Transition {
    pub effects: Vec<Effect>,
}

impl Transition {
    fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    fn toast(&mut self, toast: Toast) {
        self.effects.push(Effect::Toast(toast));
    }

    pub fn toasts(&self) -> impl Iterator<Item = &Toast> {
        self.effects.iter().filter_map(|e| match e {
            Effect::Toast(t) => Some(t),
            _ => None,
        })
    }

    pub fn has(&self, effect: &Effect) -> bool {
        self.effects.contains(effect)
    }
}

fn input_error_toast(err: &SiteMetricsError, plural: bool) -> Toast {
    let description = match (err, plural) {
        (SiteMetricsError::EmptyInputError { .. }, false) => "Please enter a website URL",
        (SiteMetricsError::EmptyInputError { .. }, true) => "Please enter both website URLs",
        (_, false) => "Please enter a valid website URL",
        (_, true) => "Please enter valid website URLs",
    };
    Toast::error("Error", description)
}

fn open_analytics(state: &mut DashboardState, domain: String, out: &mut Transition) {
    state.section = Section::Analytics;
    out.push(Effect::RenderAnalytics(domain.clone()));
    out.toast(Toast::success(
        "Analysis Complete",
        format!("Successfully analyzed {}", domain),
    ));
    state.current_website = Some(domain);
}

pub fn reduce(state: &mut DashboardState, action: Action, today: NaiveDate) -> Transition {
    let mut out = Transition::default();

    match action {
        Action::ToggleTheme => {
            state.theme = state.theme.toggled();
            out.push(Effect::PersistTheme);
            // charts pick their colors from the theme
            if let Some(domain) = &state.current_website {
                out.push(Effect::RenderAnalytics(domain.clone()));
            }
        }

        Action::ShowSection(section) => {
            state.section = section;
            match section {
                Section::Analytics => {
                    if let Some(domain) = &state.current_website {
                        out.push(Effect::RenderAnalytics(domain.clone()));
                    }
                }
                Section::Bookmarks => out.push(Effect::RenderBookmarks),
                Section::Compare if state.comparison.is_some() => {
                    out.push(Effect::RenderComparison)
                }
                _ => {}
            }
        }

        Action::Search(raw) => match validate_website_input("website", &raw) {
            Ok(domain) => open_analytics(state, domain, &mut out),
            Err(e) => out.toast(input_error_toast(&e, false)),
        },

        Action::OpenFromQuery(website) => {
            open_analytics(state, normalize_domain(&website), &mut out)
        }

        Action::Compare {
            website_a,
            website_b,
        } => {
            // both fields are required before either is checked for a dot
            if website_a.trim().is_empty() || website_b.trim().is_empty() {
                out.toast(Toast::error("Error", "Please enter both website URLs"));
                return out;
            }
            match compare(&website_a, &website_b, today) {
                Ok(comparison) => {
                    out.toast(Toast::success(
                        "Comparison Complete",
                        format!("Compared {} vs {}", comparison.a.domain, comparison.b.domain),
                    ));
                    state.comparison = Some(comparison);
                    state.section = Section::Compare;
                    out.push(Effect::RenderComparison);
                }
                Err(e) => out.toast(input_error_toast(&e, true)),
            }
        }

        Action::BookmarkCurrent { saved_at } => {
            let Some(website) = state.current_website.as_deref() else {
                out.toast(Toast::error("Error", "Please analyze a website first"));
                return out;
            };
            let metrics = generate_on(website, today);
            if state.is_bookmarked(&metrics.domain) {
                out.toast(Toast::error(
                    "Already Bookmarked",
                    "This website is already in your bookmarks",
                ));
                return out;
            }

            state.bookmarks.push(Bookmark::from_metrics(&metrics, saved_at));
            out.push(Effect::PersistBookmarks);
            out.toast(Toast::success(
                "Bookmarked",
                format!("Added {} to your bookmarks", metrics.domain),
            ));
            if state.section == Section::Bookmarks {
                out.push(Effect::RenderBookmarks);
            }
        }

        Action::RemoveBookmark(domain) => {
            state.bookmarks.retain(|b| b.domain != domain);
            out.push(Effect::PersistBookmarks);
            out.toast(Toast::success(
                "Removed",
                format!("Removed {} from bookmarks", domain),
            ));
            out.push(Effect::RenderBookmarks);
        }

        Action::ViewBookmark(domain) => open_analytics(state, domain, &mut out),

        Action::Share => {
            out.push(Effect::Share {
                website: state.current_website.clone(),
            });
            state.fab_open = false;
        }

        Action::ToggleFab => state.fab_open = !state.fab_open,

        Action::DismissFab => state.fab_open = false,
    }

    out
}
