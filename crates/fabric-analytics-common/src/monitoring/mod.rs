//! Metrics are plain `tracing` events carrying a `monotonic_counter.`, `counter.` or `histogram.`
//! prefixed field, so any subscriber layer able to interpret them can aggregate
//! them without the emitting code depending on an exporter.

#[macro_export]
macro_rules! measure_duration {
    ($e: expr) => {{
        let now = std::time::Instant::now();

        let result = $e;
        (result, now.elapsed())
    }};
}

#[macro_export]
macro_rules! metric {
    (counter [ $label: ident ] = $i: expr $(,$field: ident = $value: expr)*) => {
        $crate::tracing::debug!(monotonic_counter.$label = $i, $($field = $value),*)
    };
    (on error $e: expr => counter [ $label: ident ] = $i: expr $(,$field: ident = $value: expr)*) => {
        if let Err(ref e) = $e {
            $crate::tracing::debug!(counter.$label = $i, $($field = $value,)* error = e.to_string());
        }
    };
    (histogram [ $label: ident ] = $i: expr $(,$field: ident = $value: expr)*) => {
        $crate::tracing::debug!(histogram.$label = $i as f64, $($field = $value),*)
    };
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    #[test]
    fn measure_duration_returns_value_and_elapsed() {
        let (value, elapsed) = measure_duration!({
            std::thread::sleep(Duration::from_millis(5));
            42
        });

        assert_eq!(value, 42);
        assert!(elapsed >= Duration::from_millis(5));
    }

    #[test]
    fn metric_on_error_accepts_results() {
        let result: Result<(), String> = Err("boom".to_string());

        metric!(counter[fabric_request] = 1, method = "fetch");
        metric!(on error result => counter[fabric_request_error] = 1, method = "fetch");
        metric!(histogram[fabric_request_duration_milliseconds] = 12u128, method = "fetch");
    }
}
