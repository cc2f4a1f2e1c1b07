use yew::prelude::*;
use yew_router::prelude::*;
use crate::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div style="min-height: 100vh; display: flex; flex-direction: column; align-items: center; justify-content: center; color: #fff; padding: 2rem;">
            <h1>{"Page not found"}</h1>
            <p style="color: rgba(255, 255, 255, 0.7);">{"The page you were looking for does not exist."}</p>
            <Link<Route> to={Route::Home} classes="forward-link">
                {"Back to the home page"}
            </Link<Route>>
        </div>
    }
}
