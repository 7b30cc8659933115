//! Static informational pages

use leptos::prelude::*;

use super::Page;

#[component]
pub fn AboutPage() -> impl IntoView {
    let pillars = [
        ("Scientific Precision", "Moving beyond guesswork with AI models trained on verified botanical datasets."),
        ("Farmer Centric", "Designed for high-glare field usage and one-handed mobile navigation."),
        ("Quality First", "Standardizing the grading process to ensure pharmaceutical-grade supply chains."),
    ];

    view! {
        <Page title="About the Portal" subtitle="The bridge between traditional botanical knowledge and modern AI.">
            <div class="card-grid">
                {pillars
                    .into_iter()
                    .map(|(title, desc)| {
                        view! {
                            <div class="card">
                                <h3>{title}</h3>
                                <p class="muted">{desc}</p>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="card">
                <h3>"What makes us different?"</h3>
                <ul class="check-list">
                    <li>"Clean UI optimized for field usage"</li>
                    <li>"Separate modules for modular API integration"</li>
                    <li>"Instant reporting and quality grading cards"</li>
                    <li>"Mobile-first responsive architecture"</li>
                </ul>
            </div>
        </Page>
    }
}

struct Package {
    name: &'static str,
    price: &'static str,
    desc: &'static str,
    features: &'static [&'static str],
    cta: &'static str,
}

const PACKAGES: [Package; 3] = [
    Package {
        name: "Starter",
        price: "Free",
        desc: "Perfect for students and botanical researchers testing the UI.",
        features: &["Basic dashboard access", "Standard plant database", "Demo analysis flows", "Community support"],
        cta: "Get Started",
    },
    Package {
        name: "Professional",
        price: "Monthly",
        desc: "For commercial farms needing real-time AI diagnostic power.",
        features: &[
            "Unlimited API requests",
            "Quality grading history",
            "PDF health reports",
            "Priority botanical support",
            "Early access to new models",
        ],
        cta: "Upgrade Now",
    },
    Package {
        name: "Enterprise",
        price: "Custom",
        desc: "Full-scale integration for pharmaceutical supply chains.",
        features: &[
            "Dedicated Flask server",
            "Multi-user permissions",
            "White-label reports",
            "On-site deployment help",
            "24/7 Phone support",
        ],
        cta: "Contact Sales",
    },
];

#[component]
pub fn PackagesPage() -> impl IntoView {
    view! {
        <Page title="Scale Your Growth" subtitle="Choose the precision level your botanical operation requires.">
            <div class="card-grid">
                {PACKAGES
                    .iter()
                    .map(|p| {
                        let href = if p.cta == "Contact Sales" { "/contact" } else { "/register" };
                        view! {
                            <div class="card package">
                                <h3>{p.name}</h3>
                                <p class="price">{p.price}</p>
                                <p class="muted">{p.desc}</p>
                                <ul class="check-list">
                                    {p.features.iter().map(|f| view! { <li>{*f}</li> }).collect_view()}
                                </ul>
                                <a href=href class="btn btn-primary">{p.cta}</a>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </Page>
    }
}

/// Contact form; messages are only acknowledged locally.
#[component]
pub fn ContactPage() -> impl IntoView {
    let sent = RwSignal::new(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        tracing::info!("Contact form submitted");
        sent.set(true);
    };

    view! {
        <Page title="Get in Touch" subtitle="Whether you're a farmer or a developer, we're here to help.">
            <div class="card-grid">
                <div class="card">
                    <h3>"Contact Information"</h3>
                    <p><b>"Location: "</b> "Western Province, Sri Lanka"</p>
                    <p><b>"Email: "</b> "support@greenayu.lk"</p>
                    <p class="muted">"Expected response time: " <b>"Under 24 hours"</b></p>
                </div>
                <form class="card auth-form" on:submit=on_submit>
                    <Show
                        when=move || sent.get()
                        fallback=|| view! {
                            <label class="field">
                                <span class="field-label">"Full Name"</span>
                                <input class="input" required=true />
                            </label>
                            <label class="field">
                                <span class="field-label">"Email Address"</span>
                                <input type="email" class="input" required=true />
                            </label>
                            <label class="field">
                                <span class="field-label">"Message"</span>
                                <textarea
                                    class="input"
                                    rows="5"
                                    placeholder="How can we help your botanical operation?"
                                    required=true
                                ></textarea>
                            </label>
                            <button type="submit" class="btn btn-primary">"Send Message"</button>
                        }
                    >
                        <div class="alert alert-success">"Message received. We'll get back to you soon."</div>
                    </Show>
                </form>
            </div>
        </Page>
    }
}

#[component]
pub fn TermsPage() -> impl IntoView {
    let sections = [
        (
            "Botanical Accuracy & Usage",
            "This portal provides AI-driven estimates and recommendations for medicinal plant species. \
             All automated identifications and health assessments should be validated by a certified \
             herbalist or laboratory before commercial distribution.",
        ),
        (
            "Data Integrity & Security",
            "Users are responsible for maintaining the confidentiality of their credentials and ensuring \
             uploaded data follows local agricultural compliance regulations.",
        ),
        (
            "Professional Disclaimer",
            "Predictions (including quality grades, yield estimates, and shelf-life forecasts) are variable. \
             Camera quality, lighting and environmental conditions can impact AI accuracy. GreenAyu is not \
             liable for crop loss or quality deviations.",
        ),
    ];

    view! {
        <Page
            title="Terms of Service"
            subtitle="Ensuring safety, transparency, and data integrity in botanical intelligence."
        >
            <div class="alert alert-info">
                <b>"Notice for Field Operators: "</b>
                "AI diagnostics are supporting tools, not a replacement for official pharmaceutical quality testing."
            </div>
            {sections
                .into_iter()
                .map(|(title, content)| {
                    view! {
                        <div class="card">
                            <h3>{title}</h3>
                            <p>{content}</p>
                        </div>
                    }
                })
                .collect_view()}
        </Page>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <Page title="404 Error" subtitle="The specimen you are looking for cannot be located.">
            <div class="card center">
                <p class="muted">
                    "Try: " <b>"Identification"</b> ", " <b>"Fertilizer"</b> " or " <b>"Quality Reports"</b>
                </p>
                <a href="/" class="btn btn-primary">"Go Home"</a>
            </div>
        </Page>
    }
}
