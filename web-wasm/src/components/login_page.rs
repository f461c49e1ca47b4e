//! ランディング（ログイン・ユーザー登録）

use crate::app::use_app;
use dristi_common::{validate_email, validate_password, Navigator, Notice, Page, RegisterRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    Login,
    Register,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let (mode, set_mode) = signal(Mode::Login);

    view! {
        <div class="auth-card">
            <h1>"DRISTI"</h1>
            <div class="tabs">
                <button class:active=move || mode.get() == Mode::Login on:click=move |_| set_mode.set(Mode::Login)>
                    "Sign in"
                </button>
                <button class:active=move || mode.get() == Mode::Register on:click=move |_| set_mode.set(Mode::Register)>
                    "Register"
                </button>
            </div>
            <Show when=move || mode.get() == Mode::Login fallback=move || view! { <RegisterForm on_done=move || set_mode.set(Mode::Login) /> }>
                <LoginForm />
            </Show>
        </div>
    }
}

#[component]
fn LoginForm() -> impl IntoView {
    let ctx = use_app();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let user = username.get_untracked();
        let pass = password.get_untracked();
        if user.trim().is_empty() || pass.is_empty() {
            ctx.notify(Notice::error("Please fill in all required fields"));
            return;
        }

        set_busy.set(true);
        let client = ctx.client();
        spawn_local(async move {
            match client.login_user(user.trim(), &pass).await {
                Ok(_) => {
                    ctx.notify(Notice::success("Login successful"));
                    client.navigator().redirect(Page::Dashboard.path());
                }
                Err(e) => ctx.notify(Notice::error(e.to_string())),
            }
            set_busy.set(false);
        });
    };

    view! {
        <form class="auth-form" on:submit=on_submit>
            <label>"Username"</label>
            <input type="text" bind:value=username />
            <label>"Password"</label>
            <input type="password" bind:value=password />
            <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                {move || if busy.get() { "Signing in..." } else { "Sign in" }}
            </button>
        </form>
    }
}

#[component]
fn RegisterForm<F>(on_done: F) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    let ctx = use_app();
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let request = RegisterRequest {
            username: username.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            full_name: Some(full_name.get_untracked().trim().to_string()).filter(|n| !n.is_empty()),
        };
        if request.username.is_empty() {
            ctx.notify(Notice::error("Please fill in all required fields"));
            return;
        }
        if let Err(e) = validate_email(&request.email).and(validate_password(&request.password)) {
            ctx.notify(Notice::error(e.to_string()));
            return;
        }

        set_busy.set(true);
        let client = ctx.client();
        spawn_local(async move {
            match client.register_user(&request).await {
                Ok(_) => {
                    ctx.notify(Notice::success("Registration successful. Please sign in."));
                    on_done();
                }
                Err(e) => ctx.notify(Notice::error(e.to_string())),
            }
            set_busy.set(false);
        });
    };

    view! {
        <form class="auth-form" on:submit=on_submit>
            <label>"Username"</label>
            <input type="text" bind:value=username />
            <label>"Email"</label>
            <input type="email" bind:value=email />
            <label>"Full name"</label>
            <input type="text" bind:value=full_name />
            <label>"Password"</label>
            <input type="password" bind:value=password />
            <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                "Register"
            </button>
        </form>
    }
}
