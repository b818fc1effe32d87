use fltk::app;

use article_params::app::logging::init_logging;
use article_params::app::{ListenerRegistry, PanelConfig, PanelController, PanelMessage, RootRegion};
use article_params::ui::main_window::build_main_window;

fn main() {
    init_logging();

    let app = app::App::default();
    let (sender, receiver) = app::channel::<PanelMessage>();

    let config = PanelConfig::load();
    let registry = ListenerRegistry::new();
    let root = RootRegion::new();

    let mut widgets = build_main_window(&config, &sender);
    widgets.install_event_hook(&registry, &root, &sender);

    // The article is the host: it takes applied drafts and returns to the
    // defaults on reset
    let mut applied_article = widgets.article.clone();
    let mut reset_article = widgets.article.clone();
    let defaults = config.defaults.clone();
    let mut panel = PanelController::new(config, registry, root.clone())
        .on_apply(move |draft| applied_article.apply_draft(&draft))
        .on_reset(move || reset_article.apply_draft(&defaults));

    widgets.mount(&root);
    tracing::info!("article parameters panel ready");

    while app.wait() {
        while let Some(msg) = receiver.recv() {
            let outcome = panel.update(msg);
            widgets.render(&panel, &outcome);
        }
    }
}
