use crate::{
    browser::{
        apply_theme, apply_theme_with_transition, current_year, scroll_to_top, scroll_y,
        system_prefers_dark, BrowserPointerHost, BrowserStore, BrowserVisibilityHost, ListenerGuard,
    },
    config::RuntimeConfig,
    content::{
        project_categories, ABOUT_PARAGRAPHS, ALL_CATEGORIES, CERTIFICATES, CONTACT_EMAIL,
        EXPERIENCE, LEADERSHIP, NAV_LINKS, OWNER_NAME, OWNER_TAGLINE, PROJECTS, SKILL_CATEGORIES,
        SOCIAL_LINKS,
    },
    logging::EventLog,
    pointer::{IndicatorStyle, PointerState, PointerTracker},
    reveal::{RevealController, Section},
    storage::PreferenceStore,
    theme::{Theme, ThemeController},
    visitor::record_visit,
};
use gloo_timers::callback::Timeout;
use std::rc::Rc;
use web_sys::{window, Element, EventTarget, MouseEvent};
use yew::prelude::*;

#[derive(Clone)]
struct ThemeContext(Rc<ThemeController>);

impl PartialEq for ThemeContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Long-lived state created once per page load by the composition root.
struct Services {
    theme: ThemeContext,
    visitor_count: u64,
}

impl Services {
    fn start(config: &RuntimeConfig, log: EventLog) -> Self {
        let store: Rc<dyn PreferenceStore> = Rc::new(BrowserStore);
        let theme = ThemeController::new(
            Rc::clone(&store),
            config.theme_key.clone(),
            system_prefers_dark(),
            log,
        );
        let visitor_count = record_visit(
            &*store,
            &config.visitor_key,
            config.visitor_baseline,
            js_sys::Math::random,
            log,
        );

        Self {
            theme: ThemeContext(Rc::new(theme)),
            visitor_count,
        }
    }
}

#[hook]
fn use_theme() -> (Theme, Callback<MouseEvent>) {
    let context = use_context::<ThemeContext>().expect("ThemeContext provider missing");
    let theme = use_state_eq(|| context.0.current());

    {
        let theme = theme.clone();
        use_effect_with(context.clone(), move |context| {
            theme.set(context.0.current());
            let subscription = context.0.subscribe(move |next| theme.set(next));
            move || drop(subscription)
        });
    }

    let on_toggle = Callback::from(move |_: MouseEvent| {
        context.0.toggle();
    });

    (*theme, on_toggle)
}

#[hook]
fn use_reveal(section: Section) -> (NodeRef, bool) {
    let log = use_context::<EventLog>().unwrap_or_default();
    let node = use_node_ref();
    let revealed = use_state_eq(|| false);

    {
        let node = node.clone();
        let revealed = revealed.clone();
        use_effect_with(section, move |section| {
            let section = *section;
            let controller = node.cast::<Element>().map(|element| {
                let host = BrowserVisibilityHost::new(element);
                let setter = revealed.clone();
                RevealController::mount(
                    &host,
                    section.id(),
                    section.reveal_config(),
                    move |value| setter.set(value),
                    log,
                )
            });

            // No element to watch: show the content rather than hide it forever.
            revealed.set(controller.as_ref().map_or(true, RevealController::revealed));
            move || drop(controller)
        });
    }

    (node, *revealed)
}

#[function_component(Cursor)]
fn cursor() -> Html {
    let log = use_context::<EventLog>().unwrap_or_default();
    let pointer = use_state_eq(|| PointerState {
        suppressed: true,
        ..PointerState::default()
    });

    {
        let pointer = pointer.clone();
        use_effect_with((), move |_| {
            let setter = pointer.clone();
            let tracker = BrowserPointerHost::new().map(|host| {
                PointerTracker::mount(Rc::new(host), move |state| setter.set(state), log)
            });

            pointer.set(tracker.as_ref().map_or(
                PointerState {
                    suppressed: true,
                    ..PointerState::default()
                },
                PointerTracker::state,
            ));
            move || drop(tracker)
        });
    }

    let state = *pointer;
    if state.suppressed {
        return Html::default();
    }

    let ring = IndicatorStyle::ring(&state);
    let dot = IndicatorStyle::dot(&state);

    html! {
        <>
            <div
                class={classes!("cursor-ring", state.hovering_interactive.then_some("is-hovering"))}
                style={ring.css()}
                aria-hidden="true"
            />
            <div class="cursor-dot" style={dot.css()} aria-hidden="true" />
        </>
    }
}

#[derive(Properties, PartialEq)]
struct HeaderProps {
    scroll_offset: u32,
}

#[function_component(Header)]
fn header(props: &HeaderProps) -> Html {
    let (theme, on_toggle) = use_theme();
    let menu_open = use_state_eq(|| false);
    let scrolled = use_state_eq(|| false);

    {
        let scrolled = scrolled.clone();
        use_effect_with(props.scroll_offset, move |offset| {
            let offset = f64::from(*offset);
            scrolled.set(scroll_y() > offset);

            let guard = window().and_then(|w| {
                let target: EventTarget = w.into();
                ListenerGuard::new(&target, "scroll", move |_| scrolled.set(scroll_y() > offset))
            });
            move || drop(guard)
        });
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(false))
    };

    html! {
        <header class={classes!("site-header", (*scrolled).then_some("is-scrolled"))}>
            <a class="brand" href="#hero">{OWNER_NAME}</a>
            <nav class={classes!("site-nav", (*menu_open).then_some("is-open"))} aria-label="Primary">
                <ul>
                    { for NAV_LINKS.iter().map(|link| html! {
                        <li><a href={link.href} onclick={close_menu.clone()}>{link.label}</a></li>
                    }) }
                </ul>
            </nav>
            <button
                class="theme-toggle"
                type="button"
                aria-label={theme.toggle_label()}
                aria-pressed={theme.pressed().to_string()}
                onclick={on_toggle}
            >
                <span aria-hidden="true">{theme.icon()}</span>
            </button>
            <button
                class="menu-toggle"
                type="button"
                aria-label="Toggle menu"
                aria-expanded={(*menu_open).to_string()}
                onclick={toggle_menu}
            >
                { if *menu_open { "✕" } else { "☰" } }
            </button>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct RevealSectionProps {
    section: Section,
    eyebrow: AttrValue,
    title: AttrValue,
    #[prop_or_default]
    intro: Option<AttrValue>,
    #[prop_or_default]
    toolbar: Html,
    #[prop_or_default]
    grid_class: Classes,
    #[prop_or_default]
    children: Children,
}

/// A content section whose children enter one after another, in document
/// order, the first time the section scrolls into view.
#[function_component(RevealSection)]
fn reveal_section(props: &RevealSectionProps) -> Html {
    let (node, revealed) = use_reveal(props.section);
    let config = props.section.reveal_config();
    let heading_id = format!("{}-heading", props.section.id());

    html! {
        <section id={props.section.id()} class="section-block" aria-labelledby={heading_id.clone()}>
            <div class="section-heading">
                <span class="eyebrow">{props.eyebrow.clone()}</span>
                <h2 id={heading_id}>{props.title.clone()}</h2>
                if let Some(intro) = props.intro.clone() {
                    <p class="muted">{intro}</p>
                }
            </div>
            {props.toolbar.clone()}
            <div
                ref={node}
                class={classes!("reveal-grid", props.grid_class.clone(), revealed.then_some("is-revealed"))}
            >
                { for props.children.iter().enumerate().map(|(index, child)| html! {
                    <div class="reveal-item" style={config.child_style(revealed, index)}>{child}</div>
                }) }
            </div>
        </section>
    }
}

fn tag_list(items: &[&'static str]) -> Html {
    html! {
        <ul class="tag-list">
            { for items.iter().map(|item| html! { <li class="tag">{*item}</li> }) }
        </ul>
    }
}

#[function_component(Hero)]
fn hero() -> Html {
    html! {
        <section id="hero" class="hero">
            <p class="eyebrow">{"Hello, I'm"}</p>
            <h1>{OWNER_NAME}</h1>
            <p class="hero-tagline">{OWNER_TAGLINE}</p>
            <div class="hero-actions">
                <a class="btn-primary" href="#projects">{"View my work"}</a>
                <a class="btn-secondary" href="#contact">{"Get in touch"}</a>
            </div>
        </section>
    }
}

#[function_component(ProjectsSection)]
fn projects_section() -> Html {
    let active = use_state_eq(|| ALL_CATEGORIES);

    let filters: Html = project_categories()
        .into_iter()
        .map(|category| {
            let is_active = *active == category;
            let onclick = {
                let active = active.clone();
                Callback::from(move |_: MouseEvent| active.set(category))
            };
            html! {
                <button
                    type="button"
                    class={classes!("filter-chip", is_active.then_some("is-active"))}
                    aria-pressed={is_active.to_string()}
                    onclick={onclick}
                >
                    {category}
                </button>
            }
        })
        .collect();

    let toolbar = html! { <div class="filter-row" role="group" aria-label="Project categories">{filters}</div> };

    html! {
        <RevealSection
            section={Section::Projects}
            eyebrow="My Work"
            title="Featured Projects"
            toolbar={toolbar}
            grid_class={classes!("card-grid")}
        >
            { for PROJECTS
                .iter()
                .filter(|project| *active == ALL_CATEGORIES || project.category == *active)
                .map(|project| html! {
                    <article class="card">
                        <span class="muted">{project.category}</span>
                        <h3>{project.title}</h3>
                        <p>{project.description}</p>
                        {tag_list(project.technologies)}
                        <a href={project.link} target="_blank" rel="noopener noreferrer">{"Source ↗"}</a>
                    </article>
                }) }
        </RevealSection>
    }
}

#[derive(Properties, PartialEq)]
struct FooterProps {
    visitor_count: u64,
}

#[function_component(Footer)]
fn footer(props: &FooterProps) -> Html {
    let on_top = Callback::from(|_: MouseEvent| scroll_to_top());

    html! {
        <footer class="site-footer">
            <div class="footer-social">
                { for SOCIAL_LINKS.iter().map(|link| html! {
                    <a class="social-link" href={link.href} target="_blank" rel="noopener noreferrer">{link.label}</a>
                }) }
            </div>
            <p class="muted">
                {format!("© {} {OWNER_NAME}", current_year())}
            </p>
            <p class="visitor-count" aria-live="polite">
                {format!("{} visits", props.visitor_count)}
            </p>
            <button class="back-to-top" type="button" aria-label="Back to top" onclick={on_top}>{"↑"}</button>
        </footer>
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: RuntimeConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let log = EventLog::new(props.config.log_level);
    let services = {
        let config = props.config.clone();
        use_memo((), move |_| Services::start(&config, log))
    };
    let loading = use_state_eq(|| props.config.loading_delay_ms > 0);

    {
        let loading = loading.clone();
        use_effect_with(props.config.loading_delay_ms, move |delay| {
            let timeout = (*delay > 0).then(|| Timeout::new(*delay, move || loading.set(false)));
            move || drop(timeout)
        });
    }

    use_effect_with(services.theme.clone(), |context| {
        apply_theme(context.0.current());
        let subscription = context.0.subscribe(apply_theme_with_transition);
        move || drop(subscription)
    });

    if *loading {
        return html! {
            <div class="loading-screen" role="status">
                <span class="loading-label">{"Loading..."}</span>
            </div>
        };
    }

    html! {
        <ContextProvider<EventLog> context={log}>
            <ContextProvider<ThemeContext> context={services.theme.clone()}>
                <Cursor />
                <a class="skip-link" href="#content">{"Skip to main content"}</a>
                <div class="page-shell">
                    <Header scroll_offset={props.config.header_scroll_offset} />
                    <main id="content">
                        <Hero />
                        <RevealSection section={Section::About} eyebrow="About Me" title="Who I Am">
                            { for ABOUT_PARAGRAPHS.iter().map(|paragraph| html! { <p>{*paragraph}</p> }) }
                        </RevealSection>
                        <RevealSection
                            section={Section::Skills}
                            eyebrow="My Expertise"
                            title="Skills & Technologies"
                            grid_class={classes!("card-grid")}
                        >
                            { for SKILL_CATEGORIES.iter().map(|category| html! {
                                <article class="card">
                                    <h3>{category.title}</h3>
                                    {tag_list(category.skills)}
                                </article>
                            }) }
                        </RevealSection>
                        <ProjectsSection />
                        <RevealSection section={Section::Experience} eyebrow="Career" title="Work Experience">
                            { for EXPERIENCE.iter().map(|job| html! {
                                <article class="timeline-entry">
                                    <h3>{job.role}</h3>
                                    <p class="muted">{format!("{} · {} · {}", job.company, job.location, job.period)}</p>
                                    <ul>{ for job.highlights.iter().map(|line| html! { <li>{*line}</li> }) }</ul>
                                </article>
                            }) }
                        </RevealSection>
                        <RevealSection
                            section={Section::Certificates}
                            eyebrow="Credentials"
                            title="Certificates"
                            grid_class={classes!("card-grid")}
                        >
                            { for CERTIFICATES.iter().map(|certificate| html! {
                                <article class="card">
                                    <h3>{certificate.title}</h3>
                                    <p class="muted">{certificate.issuer}</p>
                                </article>
                            }) }
                        </RevealSection>
                        <RevealSection section={Section::Leadership} eyebrow="Beyond Code" title="Leadership">
                            { for LEADERSHIP.iter().map(|role| html! {
                                <article class="card">
                                    <h3>{role.title}</h3>
                                    <p class="muted">{format!("{} • {}", role.organization, role.period)}</p>
                                    <p>{role.summary}</p>
                                </article>
                            }) }
                        </RevealSection>
                        <RevealSection
                            section={Section::Contact}
                            eyebrow="Get In Touch"
                            title="Contact"
                            intro="Open to data science roles and collaborations."
                        >
                            <a class="btn-primary" href={format!("mailto:{CONTACT_EMAIL}")}>{CONTACT_EMAIL}</a>
                            <div class="contact-links">
                                { for SOCIAL_LINKS.iter().map(|link| html! {
                                    <a class="social-link" href={link.href} target="_blank" rel="noopener noreferrer">{link.label}</a>
                                }) }
                            </div>
                        </RevealSection>
                    </main>
                    <Footer visitor_count={services.visitor_count} />
                </div>
            </ContextProvider<ThemeContext>>
        </ContextProvider<EventLog>>
    }
}

pub fn run() {
    let root = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"))
        .expect("missing #app mount point");
    let config = RuntimeConfig::from_lookup(|name| root.get_attribute(&format!("data-{name}")));

    yew::Renderer::<App>::with_root_and_props(root, AppProps { config }).render();
}
