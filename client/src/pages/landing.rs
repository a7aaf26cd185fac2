//! Landing page with hero copy, feature grid, and auth entry points.

#[cfg(test)]
#[path = "landing_test.rs"]
mod landing_test;

use leptos::prelude::*;

use crate::components::auth_modal::AuthModal;
use crate::components::navbar::Navbar;
use crate::state::auth::{Session, SessionStatus};
use crate::state::auth_form::FormMode;

/// One card in the feature grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Feature {
    pub icon: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

pub const FEATURES: [Feature; 6] = [
    Feature {
        icon: "🎙",
        title: "Real-time Recording",
        body: "Record lectures directly in your browser with crystal-clear audio capture and automatic transcription as you listen.",
    },
    Feature {
        icon: "🤖",
        title: "AI Simplification",
        body: "Complex academic language is automatically simplified into clear, easy-to-read text that everyone can understand.",
    },
    Feature {
        icon: "♿",
        title: "Fully Accessible",
        body: "OpenDyslexic font, adjustable spacing, color themes, and WCAG compliance, built for accessibility from the ground up.",
    },
    Feature {
        icon: "📖",
        title: "Dyslexia Friendly",
        body: "Specially designed with OpenDyslexic font, adjustable line spacing, high contrast modes, and customizable text size for optimal reading comfort.",
    },
    Feature {
        icon: "✨",
        title: "Smart Summaries",
        body: "AI extracts key points and creates chapter breakdowns automatically. Get instant review notes with the most important concepts highlighted.",
    },
    Feature {
        icon: "💾",
        title: "Export & Save",
        body: "Save notes in multiple formats: PDF, Word, or plain text. Cloud sync keeps everything accessible offline and easy to share with classmates.",
    },
];

/// What the hero's primary button does for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeroAction {
    GoToDashboard,
    OpenAuthModal(FormMode),
}

impl HeroAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::GoToDashboard => "Go to Dashboard",
            Self::OpenAuthModal(_) => "Try SimplifiED Now",
        }
    }
}

pub fn hero_action(status: SessionStatus) -> HeroAction {
    match status {
        SessionStatus::SignedIn => HeroAction::GoToDashboard,
        SessionStatus::Unknown | SessionStatus::SignedOut => HeroAction::OpenAuthModal(FormMode::SignUp),
    }
}

#[component]
pub fn LandingPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let modal_open = RwSignal::new(false);
    let modal_mode = RwSignal::new(FormMode::SignUp);

    let open_modal = move |mode: FormMode| {
        modal_mode.set(mode);
        modal_open.set(true);
    };

    let action = move || hero_action(session.with(Session::status));

    view! {
        <div class="landing-page">
            <Navbar/>

            <section class="landing-hero">
                <h1 class="landing-hero__title">
                    "Make Every Lecture "
                    <span class="landing-hero__accent">"Easy to Understand"</span>
                    ", Instantly."
                </h1>
                <p class="landing-hero__lead">
                    "SimplifiED helps students with dyslexia and reading challenges by turning complex lectures into clear, simple, and accessible notes in real time."
                </p>
                <div class="landing-hero__actions">
                    {move || match action() {
                        HeroAction::GoToDashboard => view! {
                            <a href="/dashboard" class="landing-button landing-button--primary">
                                {HeroAction::GoToDashboard.label()}
                            </a>
                        }
                        .into_any(),
                        HeroAction::OpenAuthModal(mode) => view! {
                            <button
                                class="landing-button landing-button--primary"
                                type="button"
                                on:click=move |_| open_modal(mode)
                            >
                                {HeroAction::OpenAuthModal(mode).label()}
                            </button>
                        }
                        .into_any(),
                    }}
                    <a href="#features" class="landing-button">"Learn More"</a>
                </div>
            </section>

            <section id="features" class="landing-features">
                <h2>"Designed for Everyone"</h2>
                <p class="landing-features__lead">
                    "With features built specifically for students with dyslexia and reading challenges"
                </p>
                <div class="landing-features__grid">
                    {FEATURES
                        .iter()
                        .map(|feature| {
                            view! {
                                <article class="feature-card">
                                    <span class="feature-card__icon" aria-hidden="true">{feature.icon}</span>
                                    <h3>{feature.title}</h3>
                                    <p>{feature.body}</p>
                                </article>
                            }
                        })
                        .collect_view()}
                </div>
            </section>

            <section class="landing-cta">
                <h2>"Ready to Transform Your Learning?"</h2>
                <p>
                    "Join thousands of students who are already experiencing better understanding and retention with SimplifiED. Start your journey today."
                </p>
                {move || {
                    if session.with(Session::is_signed_in) {
                        view! { <a href="/new-lecture" class="landing-button">"Start Your First Lecture"</a> }.into_any()
                    } else {
                        view! {
                            <button class="landing-button" type="button" on:click=move |_| open_modal(FormMode::SignIn)>
                                "Sign In"
                            </button>
                        }
                        .into_any()
                    }
                }}
            </section>

            <footer class="landing-footer">
                <p>"Making education accessible for everyone, one lecture at a time."</p>
            </footer>

            <AuthModal open=modal_open mode=modal_mode/>
        </div>
    }
}
