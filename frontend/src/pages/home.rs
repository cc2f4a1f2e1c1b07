use yew::prelude::*;
use yew_router::prelude::*;
use crate::Route;
use crate::components::particle_background::ParticleBackground;
use crate::components::typewriter::Typewriter;

const HERO_PHRASES: &[&str] = &[
    "websites that convert.",
    "landing pages that load fast.",
    "brands people remember.",
    "products your customers love.",
];

#[function_component(Home)]
pub fn home() -> Html {
    // Scroll to top only on initial mount
    use_effect_with_deps(
        move |_| {
            if let Some(window) = web_sys::window() {
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
            || ()
        },
        (),
    );

    let phrases: Vec<String> = HERO_PHRASES.iter().map(|p| p.to_string()).collect();

    html! {
        <div class="landing-page">
            <style>
                {r#"
                    .hero {
                        min-height: 100vh;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        text-align: center;
                        padding: 0 2rem;
                    }
                    .hero h1 {
                        font-size: clamp(2rem, 5vw, 3.5rem);
                        color: #fff;
                        margin-bottom: 1.5rem;
                    }
                    .hero-subtitle {
                        color: rgba(255, 255, 255, 0.8);
                        font-size: 1.2rem;
                        max-width: 640px;
                        margin: 0 auto 2rem;
                    }
                    .hero-cta {
                        background: linear-gradient(45deg, #1E90FF, #7EB2FF);
                        border: none;
                        border-radius: 8px;
                        color: #fff;
                        cursor: pointer;
                        font-size: 1.1rem;
                        padding: 1rem 2rem;
                    }
                    .services {
                        display: grid;
                        grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
                        gap: 2rem;
                        max-width: 1100px;
                        margin: 0 auto;
                        padding: 4rem 2rem;
                    }
                    .service {
                        background: rgba(30, 30, 30, 0.7);
                        border: 1px solid rgba(30, 144, 255, 0.1);
                        border-radius: 16px;
                        padding: 2rem;
                        color: rgba(255, 255, 255, 0.85);
                    }
                    .service h3 {
                        color: #7EB2FF;
                    }
                    .footer-cta {
                        text-align: center;
                        padding: 4rem 2rem 6rem;
                        color: rgba(255, 255, 255, 0.85);
                    }
                "#}
            </style>
            <ParticleBackground />
            <header class="hero">
                <div class="hero-content">
                    <h1>
                        {"We design and build "}
                        <Typewriter phrases={phrases} />
                    </h1>
                    <p class="hero-subtitle">
                        {"A small studio for strategy, design and engineering. Tell us what you are building and we will tell you how we can help."}
                    </p>
                    <Link<Route> to={Route::Contact} classes="forward-link">
                        <button class="hero-cta">{"Start a project"}</button>
                    </Link<Route>>
                </div>
            </header>

            <section class="services">
                <div class="service">
                    <h3>{"Websites"}</h3>
                    <p>{"Marketing sites and landing pages built to be fast, accessible and easy to update."}</p>
                </div>
                <div class="service">
                    <h3>{"Product Design"}</h3>
                    <p>{"From the first sketch to a tested interface your team can ship with confidence."}</p>
                </div>
                <div class="service">
                    <h3>{"Engineering"}</h3>
                    <p>{"Reliable web apps and backends, with the boring parts done right."}</p>
                </div>
            </section>

            <footer class="footer-cta">
                <h2>{"Have a project in mind?"}</h2>
                <p>{"We answer every message within two business days."}</p>
                <Link<Route> to={Route::Contact} classes="forward-link">
                    <button class="hero-cta">{"Get in touch"}</button>
                </Link<Route>>
            </footer>
        </div>
    }
}
