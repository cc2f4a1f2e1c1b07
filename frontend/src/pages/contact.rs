use yew::prelude::*;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use log::{info, warn};

use crate::contact::form_model::{Banner, ContactForm};
use crate::contact::submission::{submit, RelaySuccess, SubmissionError};
use crate::contact::validation::Field;

pub enum ContactMsg {
    Edit(Field, String),
    Submit,
    Finished(Result<RelaySuccess, SubmissionError>),
    DismissBanner,
}

pub struct ContactPage {
    form: ContactForm,
}

impl Component for ContactPage {
    type Message = ContactMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            form: ContactForm::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ContactMsg::Edit(field, value) => {
                self.form.set_field(field, value);
                true
            }
            ContactMsg::Submit => {
                if let Some(submission) = self.form.begin_submit() {
                    ctx.link().send_future(async move {
                        ContactMsg::Finished(submit(&submission).await)
                    });
                }
                true
            }
            ContactMsg::Finished(result) => {
                match &result {
                    Ok(success) => info!("Contact submission delivered ({:?})", success.message_id),
                    Err(e) => warn!("Contact submission failed: {:?}", e),
                }
                self.form.finish(result);
                true
            }
            ContactMsg::DismissBanner => {
                self.form.dismiss_banner();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            ContactMsg::Submit
        });
        let submitting = self.form.is_submitting();

        html! {
            <div style="min-height: 100vh; display: flex; align-items: center; justify-content: center; padding: 6rem 2rem 2rem;">
                <style>
                    {r#".contact-container {
                        background: rgba(30, 30, 30, 0.7);
                        border: 1px solid rgba(30, 144, 255, 0.1);
                        border-radius: 16px;
                        padding: 3rem;
                        width: 100%;
                        max-width: 560px;
                        backdrop-filter: blur(10px);
                        box-shadow: 0 8px 32px rgba(0, 0, 0, 0.3);
                    }
                    .contact-container h1 {
                        font-size: 2rem;
                        margin-bottom: 0.5rem;
                        text-align: center;
                        background: linear-gradient(45deg, #fff, #7EB2FF);
                        -webkit-background-clip: text;
                        -webkit-text-fill-color: transparent;
                    }
                    .contact-intro {
                        text-align: center;
                        color: rgba(255, 255, 255, 0.8);
                        margin-bottom: 2rem;
                    }
                    .form-field {
                        display: flex;
                        flex-direction: column;
                        margin-bottom: 1.2rem;
                    }
                    .form-field label {
                        color: rgba(255, 255, 255, 0.85);
                        margin-bottom: 0.4rem;
                    }
                    .form-field input, .form-field textarea {
                        background: rgba(0, 0, 0, 0.3);
                        border: 1px solid rgba(255, 255, 255, 0.15);
                        border-radius: 8px;
                        color: #fff;
                        font-size: 1rem;
                        padding: 0.8rem;
                    }
                    .form-field.invalid input {
                        border-color: #ff6b6b;
                    }
                    .field-error {
                        color: #ff6b6b;
                        font-size: 0.85rem;
                        margin-top: 0.3rem;
                    }
                    .submit-button {
                        width: 100%;
                        padding: 1rem;
                        border: none;
                        border-radius: 8px;
                        background: linear-gradient(45deg, #1E90FF, #7EB2FF);
                        color: #fff;
                        font-size: 1rem;
                        cursor: pointer;
                    }
                    .submit-button:disabled {
                        opacity: 0.6;
                        cursor: not-allowed;
                    }
                    .banner {
                        display: flex;
                        justify-content: space-between;
                        align-items: center;
                        border-radius: 8px;
                        padding: 0.8rem 1rem;
                        margin-bottom: 1.5rem;
                    }
                    .banner button {
                        background: none;
                        border: none;
                        color: inherit;
                        cursor: pointer;
                    }
                    .success-message {
                        background: rgba(76, 175, 80, 0.15);
                        color: #8be28f;
                    }
                    .error-message {
                        background: rgba(255, 107, 107, 0.15);
                        color: #ff6b6b;
                    }"#}
                </style>
                <div class="contact-container">
                    <h1>{"Get in touch"}</h1>
                    <p class="contact-intro">{"Tell us a little about your project and we'll reply by email or phone."}</p>
                    { self.view_banner(ctx) }
                    <form onsubmit={onsubmit} novalidate=true>
                        { self.view_input(ctx, Field::Name, "Name", "text", "name") }
                        { self.view_input(ctx, Field::Email, "Email", "email", "email") }
                        { self.view_input(ctx, Field::Phone, "Phone", "tel", "tel") }
                        <div class="form-field">
                            <label for="contact-message">{"Message (optional)"}</label>
                            <textarea
                                id="contact-message"
                                rows="5"
                                value={self.form.fields().message.clone()}
                                oninput={ctx.link().callback(|e: InputEvent| {
                                    let input: HtmlTextAreaElement = e.target_unchecked_into();
                                    ContactMsg::Edit(Field::Message, input.value())
                                })}
                            />
                        </div>
                        <button class="submit-button" type="submit" disabled={submitting}>
                            { if submitting { "Sending..." } else { "Send message" } }
                        </button>
                    </form>
                </div>
            </div>
        }
    }
}

impl ContactPage {
    fn view_input(
        &self,
        ctx: &Context<Self>,
        field: Field,
        label: &'static str,
        input_type: &'static str,
        autocomplete: &'static str,
    ) -> Html {
        let id = format!("contact-{}", autocomplete);
        let error = self.form.error(field);

        html! {
            <div class={classes!("form-field", error.is_some().then(|| "invalid"))}>
                <label for={id.clone()}>{label}</label>
                <input
                    id={id}
                    type={input_type}
                    autocomplete={autocomplete}
                    value={self.form.fields().get(field).to_string()}
                    oninput={ctx.link().callback(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        ContactMsg::Edit(field, input.value())
                    })}
                />
                if let Some(message) = error {
                    <span class="field-error">{message}</span>
                }
            </div>
        }
    }

    fn view_banner(&self, ctx: &Context<Self>) -> Html {
        let dismiss = ctx.link().callback(|_| ContactMsg::DismissBanner);
        match self.form.banner() {
            Some(Banner::Success(text)) => html! {
                <div class="banner success-message">
                    <span>{text.clone()}</span>
                    <button onclick={dismiss}>{"✕"}</button>
                </div>
            },
            Some(Banner::Error(text)) => html! {
                <div class="banner error-message" role="alert">
                    <span>{text.clone()}</span>
                    <button onclick={dismiss}>{"✕"}</button>
                </div>
            },
            None => html! {},
        }
    }
}
