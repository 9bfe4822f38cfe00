//! HTML pages

use bikecast::pipeline::{Prediction, Season, Weekday};

const STYLE: &str = r"
        body { font-family: sans-serif; max-width: 500px; margin: 40px auto; padding: 20px; }
        label { display: block; margin-top: 10px; font-weight: bold; }
        input, select { width: 100%; padding: 8px; margin-top: 5px; }
        button { margin-top: 20px; width: 100%; padding: 10px; background: #28a745; color: white; border: none; cursor: pointer; }";

fn options<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
    values
        .into_iter()
        .map(|v| format!(r#"<option value="{v}">{v}</option>"#))
        .collect()
}

/// Input form for the seven features. `k` is shown in the heading.
pub(crate) fn form_page(k: usize) -> String {
    let seasons = options(Season::ALL.iter().map(|s| s.as_str()));
    let weekdays = options(Weekday::ALL.iter().map(|d| d.as_str()));
    format!(
        r#"<html>
    <head>
        <title>Bike Renter Predictor</title>
        <style>{STYLE}
        </style>
    </head>
    <body>
        <h2>🚴 Bike Renter Prediction (KNN k={k})</h2>
        <form action="/predict" method="post">
            <label>Season:</label>
            <select name="Season">{seasons}</select>

            <label>Month (1-12):</label>
            <input type="number" name="Month" required min="1" max="12">

            <label>Weekday:</label>
            <select name="Weekday">{weekdays}</select>

            <label>Working Day (0 = No, 1 = Yes):</label>
            <select name="Working_Day"><option value="1">Yes (1)</option><option value="0">No (0)</option></select>

            <label>Temperature (C):</label>
            <input type="number" step="0.1" name="Temp" required>

            <label>Humidity (%):</label>
            <input type="number" step="0.1" name="Humidity" required>

            <label>Wind (km/h):</label>
            <input type="number" step="0.1" name="Wind" required>

            <button type="submit">Predict Renters</button>
        </form>
    </body>
</html>
"#
    )
}

/// Result page for one prediction.
pub(crate) fn result_page(prediction: &Prediction) -> String {
    format!(
        r#"<html><body>
    <div style="font-family: sans-serif; max-width: 500px; margin: 40px auto; text-align: center;">
        <h1>Prediction Result</h1>
        <div style="font-size: 2em; color: #007bff; font-weight: bold;">{renters} Renters</div>
        <p>Demand Level: <strong>{level}</strong></p>
        <a href="/">Make another prediction</a>
    </div>
</body></html>
"#,
        renters = prediction.renters,
        level = prediction.level
    )
}
