//! Static about page.

use leptos::prelude::*;

use crate::components::navbar::Navbar;

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <div class="about-page">
            <Navbar/>
            <main class="about">
                <h1>"About SimplifiED"</h1>
                <p>
                    "SimplifiED helps students with dyslexia and reading challenges keep up with lectures. "
                    "Record a class in the browser and get notes written in plain, readable language."
                </p>
                <h2>"Our Mission"</h2>
                <p>"Making education accessible for everyone, one lecture at a time."</p>
                <h2>"Built for Reading Comfort"</h2>
                <ul class="about__list">
                    <li>"Dyslexia-friendly typography and spacing"</li>
                    <li>"Light and dark themes that remember your choice"</li>
                    <li>"Short, clear summaries of long lectures"</li>
                </ul>
                <a href="/signup" class="about__cta">"Get Started"</a>
            </main>
        </div>
    }
}
