#[cfg(test)]
mod tests {
    use reverb::{CaptureStore, ReverbConfiguration, ReverbServer};
    use reverb_client::{ReverbClient, ReverbClientBuilder};
    use std::{net::Ipv4Addr, sync::Arc, thread};

    fn start_reverb() -> (String, ReverbClient) {
        let mut config = ReverbConfiguration::new();
        config.set_address(Ipv4Addr::LOCALHOST.into());
        config.set_port(0);

        let server = ReverbServer::bind(&config, Arc::new(CaptureStore::new())).unwrap();
        let domain_name = format!("http://{}", server.local_addr().unwrap());
        server.spawn();

        let client = ReverbClientBuilder::new()
            .with_domain_name(domain_name.as_str())
            .build();
        (domain_name, client)
    }

    fn post(domain_name: &str, path: &str, body: &str) -> u16 {
        reqwest::blocking::Client::new()
            .post(format!("{}{}", domain_name, path))
            .body(body.to_string())
            .send()
            .unwrap()
            .status()
            .as_u16()
    }

    #[test]
    fn captured_request_can_be_read_back() {
        let (domain_name, client) = start_reverb();

        let status = reqwest::blocking::Client::new()
            .put(format!("{}/webhooks/stripe?attempt=1", domain_name))
            .header("content-type", "application/json")
            .header("x-signature", "t=1,v1=abc")
            .body(r#"{"type":"charge.succeeded"}"#)
            .send()
            .unwrap()
            .status();
        assert!(status.is_success());

        let listed = client.list().unwrap();
        assert_eq!(listed.len(), 1);

        let captured = client.get(listed[0].id).unwrap();
        assert_eq!(captured.method, "PUT");
        assert_eq!(captured.path, "/webhooks/stripe?attempt=1");
        assert_eq!(captured.headers.first("X-Signature"), Some("t=1,v1=abc"));
        assert_eq!(captured.content_type(), Some("application/json"));

        let body = client.body(captured.id).unwrap();
        assert_eq!(body, br#"{"type":"charge.succeeded"}"#.to_vec());
    }

    #[test]
    fn body_endpoint_passes_the_content_type_through() {
        let (domain_name, _) = start_reverb();

        reqwest::blocking::Client::new()
            .post(format!("{}/upload", domain_name))
            .header("content-type", "image/png")
            .body(vec![0x89u8, b'P', b'N', b'G'])
            .send()
            .unwrap();

        let response = reqwest::blocking::get(format!("{}/requests/1/body", domain_name)).unwrap();
        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(response.headers()["content-type"], "image/png");
        assert_eq!(&response.bytes().unwrap()[..], &[0x89u8, b'P', b'N', b'G'][..]);
    }

    #[test]
    fn oldest_requests_are_evicted_after_one_hundred() {
        let (domain_name, client) = start_reverb();

        for n in 1..=101 {
            assert_eq!(post(&domain_name, "/", &format!("r{}", n)), 200);
        }

        let listed = client.list().unwrap();
        assert_eq!(listed.len(), 100);
        assert_eq!(listed[0].id, 2);
        assert_eq!(listed[0].body, b"r2");
        assert_eq!(listed[99].id, 101);
        assert_eq!(listed[99].body, b"r101");

        let error = client.get(1).unwrap_err();
        assert!(error.is_not_found());
        assert!(error.to_string().contains("'1'"), "{}", error);
    }

    #[test]
    fn unknown_id_on_an_empty_bin_is_not_found() {
        let (_, client) = start_reverb();

        assert!(client.get(1).unwrap_err().is_not_found());
        assert!(client.body(1).unwrap_err().is_not_found());
        assert!(client.list().unwrap().is_empty());
    }

    #[test]
    fn flush_empties_the_bin_without_reusing_ids() {
        let (domain_name, client) = start_reverb();

        post(&domain_name, "/", "before");
        client.flush().unwrap();
        client.flush().unwrap();
        assert!(client.list().unwrap().is_empty());

        post(&domain_name, "/", "after");
        let listed = client.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, 2);
        assert_eq!(listed[0].body, b"after");
    }

    #[test]
    fn concurrent_producers_keep_the_newest_hundred() {
        let (domain_name, client) = start_reverb();
        let producers = 4;
        let per_producer = 30;

        let handles: Vec<_> = (0..producers)
            .map(|producer| {
                let domain_name = domain_name.clone();
                thread::spawn(move || {
                    for n in 0..per_producer {
                        let body = format!("{}-{}", producer, n);
                        assert_eq!(post(&domain_name, "/load", &body), 200);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let ids: Vec<u64> = client.list().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, (21..=120).collect::<Vec<u64>>());
    }
}
