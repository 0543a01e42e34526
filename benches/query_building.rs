use criterion::{black_box, criterion_group, criterion_main, Criterion};
use statcounter_client::api::endpoints::{keys, Endpoint};
use statcounter_client::{
    ClientConfig, HttpRequest, HttpResponse, ReportClient, ReportRequest, Transport, TransportError,
};

struct CannedTransport(String);

impl Transport for CannedTransport {
    fn get(&self, _request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse::new(200, self.0.clone()))
    }
}

fn popular_pages_body(rows: usize) -> String {
    let pages: Vec<String> = (0..rows)
        .map(|i| format!(r#"{{"page":"/blog/post-{}","views":{}}}"#, i, 1000 - i))
        .collect();
    format!(
        r#"{{"project_id":"123","popular_pages":[{}]}}"#,
        pages.join(",")
    )
}

fn benchmark_request_url(c: &mut Criterion) {
    let config = ClientConfig::new("bob", "s3cret")
        .unwrap()
        .with_timezone("Europe/Dublin");
    let client = ReportClient::with_transport(config, CannedTransport(String::new()));

    c.bench_function("request_url_popular_pages", |b| {
        b.iter(|| {
            let request = ReportRequest::for_project(Endpoint::PopularPages, black_box("123"))
                .unwrap()
                .with(|q| {
                    q.count(keys::NUM_OF_RESULTS, 50)
                        .text(keys::COUNT_TYPE, "visits")
                });
            client.request_url(&request)
        })
    });

    c.bench_function("request_url_create_project", |b| {
        b.iter(|| {
            let request = ReportRequest::new(Endpoint::CreateProject).with(|q| {
                q.text(keys::URL, black_box("https://example.com/a path?x=1&y=2"))
                    .text(keys::TITLE, "My Site")
                    .text(keys::TIME_ZONE, "UTC")
            });
            client.request_url(&request)
        })
    });
}

fn benchmark_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_popular_pages");

    for rows in [10, 100, 1000] {
        let config = ClientConfig::new("bob", "s3cret").unwrap();
        let transport = CannedTransport(popular_pages_body(rows));
        let client = ReportClient::with_transport(config, transport);

        group.bench_function(format!("{}_rows", rows), |b| {
            b.iter(|| client.popular_pages(black_box("123"), 0, None).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_request_url, benchmark_decode);
criterion_main!(benches);
