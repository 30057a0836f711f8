// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use rust_decimal::Decimal;
use salesync::connectivity::Connectivity;
use salesync::error::RemoteError;
use salesync::models::{
    Customer, DashboardSnapshot, LoginRequest, LoginResponse, Metric, Metrics, Period,
    ProductRecord, Profile, ReportingPeriod, Session,
};
use salesync::remote::RemoteSource;
use salesync::session::SessionStore;
use salesync::store::LocalStore;
use salesync::sync::SyncCoordinator;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub enum Reply<T> {
    Data(T),
    Status(u16),
    Timeout,
    Down,
}

impl<T: Clone> Reply<T> {
    fn get(&self) -> Result<T, RemoteError> {
        match self {
            Reply::Data(v) => Ok(v.clone()),
            Reply::Status(status) => Err(RemoteError::Status {
                status: *status,
                body: String::new(),
            }),
            Reply::Timeout => Err(RemoteError::Timeout),
            Reply::Down => Err(RemoteError::Transport("connection refused".into())),
        }
    }
}

/// Scripted backend. The first `products()` call can be held open with a gate.
pub struct FakeRemote {
    pub dashboard: Mutex<Reply<Option<DashboardSnapshot>>>,
    pub products: Mutex<Reply<Vec<ProductRecord>>>,
    pub customers: Mutex<Reply<Vec<Customer>>>,
    pub login: Mutex<Reply<LoginResponse>>,
    pub dashboard_calls: AtomicUsize,
    pub last_period: Mutex<Option<Period>>,
    gate: Mutex<Option<(Sender<()>, Receiver<()>)>>,
}

impl FakeRemote {
    pub fn new(
        dashboard: Reply<Option<DashboardSnapshot>>,
        products: Reply<Vec<ProductRecord>>,
    ) -> Self {
        Self {
            dashboard: Mutex::new(dashboard),
            products: Mutex::new(products),
            customers: Mutex::new(Reply::Data(Vec::new())),
            login: Mutex::new(Reply::Data(LoginResponse {
                token: "tok-1".into(),
                profile: Some(Profile {
                    name: Some("Asha Rep".into()),
                    account_id: Some("EXE123".into()),
                    territory: None,
                }),
            })),
            dashboard_calls: AtomicUsize::new(0),
            last_period: Mutex::new(None),
            gate: Mutex::new(None),
        }
    }

    /// Blocks the next products fetch: signals `entered`, then waits on `release`.
    pub fn hold_products(self, entered: Sender<()>, release: Receiver<()>) -> Self {
        *self.gate.lock().unwrap() = Some((entered, release));
        self
    }
}

impl RemoteSource for FakeRemote {
    fn login(&self, _req: &LoginRequest) -> Result<LoginResponse, RemoteError> {
        self.login.lock().unwrap().get()
    }

    fn dashboard(
        &self,
        _account_id: &str,
        period: Option<&Period>,
    ) -> Result<Option<DashboardSnapshot>, RemoteError> {
        self.dashboard_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_period.lock().unwrap() = period.copied();
        self.dashboard.lock().unwrap().get()
    }

    fn customers(&self, _account_id: &str) -> Result<Vec<Customer>, RemoteError> {
        self.customers.lock().unwrap().get()
    }

    fn products(&self) -> Result<Vec<ProductRecord>, RemoteError> {
        let gate = self.gate.lock().unwrap().take();
        if let Some((entered, release)) = gate {
            entered.send(()).unwrap();
            release.recv().unwrap();
        }
        self.products.lock().unwrap().get()
    }
}

/// Lets a test keep a handle on the fake after the coordinator takes ownership.
pub struct Shared(pub Arc<FakeRemote>);

impl RemoteSource for Shared {
    fn login(&self, req: &LoginRequest) -> Result<LoginResponse, RemoteError> {
        self.0.login(req)
    }

    fn dashboard(
        &self,
        account_id: &str,
        period: Option<&Period>,
    ) -> Result<Option<DashboardSnapshot>, RemoteError> {
        self.0.dashboard(account_id, period)
    }

    fn customers(&self, account_id: &str) -> Result<Vec<Customer>, RemoteError> {
        self.0.customers(account_id)
    }

    fn products(&self) -> Result<Vec<ProductRecord>, RemoteError> {
        self.0.products()
    }
}

/// Connectivity the test can flip.
#[derive(Clone)]
pub struct Switch(pub Arc<AtomicBool>);

impl Switch {
    pub fn new(online: bool) -> Self {
        Self(Arc::new(AtomicBool::new(online)))
    }

    pub fn set(&self, online: bool) {
        self.0.store(online, Ordering::SeqCst);
    }
}

impl Connectivity for Switch {
    fn is_connected(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub fn session() -> Session {
    Session {
        company_id: "ACME".into(),
        user_id: "EXE123".into(),
        token: "tok-1".into(),
        profile: None,
        last_synced_at: None,
    }
}

pub fn coordinator(remote: Arc<FakeRemote>, net: &Switch) -> SyncCoordinator {
    SyncCoordinator::new(
        Box::new(Shared(remote)),
        Box::new(net.clone()),
        LocalStore::open_in_memory().unwrap(),
        Arc::new(SessionStore::in_memory(Some(session()))),
    )
}

pub fn metric(value: i64, percentage: f64) -> Metric {
    Metric {
        value: Decimal::new(value, 0),
        percentage,
        formatted: None,
    }
}

pub fn snapshot() -> DashboardSnapshot {
    DashboardSnapshot {
        period: ReportingPeriod {
            month: "06".into(),
            year: "2023".into(),
            start_date: Some("2023-06-01".into()),
            end_date: Some("2023-06-30".into()),
        },
        metrics: Metrics {
            sales: Metric {
                value: Decimal::new(1000, 0),
                percentage: 5.2,
                formatted: Some("1,000.00".into()),
            },
            collections: metric(800, -1.5),
            returns: metric(20, 0.0),
            replacements: metric(3, 12.5),
        },
    }
}

pub fn product(code: Option<&str>, description: &str, category: &str) -> ProductRecord {
    ProductRecord {
        item_code: code.map(str::to_string),
        description: description.into(),
        price: Decimal::new(1250, 2),
        qty: Decimal::new(24, 0),
        uom: "PCS".into(),
        image_url: None,
        discount_percentage: Decimal::new(5, 0),
        discount_amount: Decimal::new(62, 2),
        category: category.into(),
        sub_category: Some("Core".into()),
    }
}

pub fn catalog() -> Vec<ProductRecord> {
    vec![
        product(Some("SKU-1"), "Cola 330ml", "Beverages"),
        product(Some("SKU-2"), "Lemonade 330ml", "Beverages"),
        product(Some("SKU-3"), "Salted Chips", "Snacks"),
        product(Some("SKU-4"), "Choc Bar", "Snacks"),
    ]
}

/// Serves one canned response per connection and records each request,
/// head and body, lowercased.
pub fn serve(replies: Vec<(u16, &'static str)>) -> (String, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}/api", listener.local_addr().unwrap());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    thread::spawn(move || {
        for (status, body) in replies {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut head = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                let lower = line.to_ascii_lowercase();
                if let Some(v) = lower.strip_prefix("content-length:") {
                    content_length = v.trim().parse().unwrap();
                }
                head.push_str(&lower);
            }
            let mut payload = vec![0u8; content_length];
            reader.read_exact(&mut payload).unwrap();
            head.push_str(&String::from_utf8_lossy(&payload).to_ascii_lowercase());
            log.lock().unwrap().push(head);

            let mut stream = reader.into_inner();
            write!(
                stream,
                "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            )
            .unwrap();
            stream.flush().unwrap();
        }
    });
    (base, seen)
}
