// TCP listener setup. A host of "*" binds a wildcard listener, preferring an
// IPv6 dual-stack socket and falling back to IPv4.

use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;

pub async fn create_listener(
    host: &str,
    port: u16,
) -> std::io::Result<(String, tokio::net::TcpListener)> {
    if host == "*" {
        return create_wildcard_listener(port);
    }

    let addr = format!("{}:{}", host, port);
    tracing::info!("Binding server to {}...", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    Ok((addr, listener))
}

fn create_wildcard_listener(port: u16) -> std::io::Result<(String, tokio::net::TcpListener)> {
    match bind_dual_stack(port) {
        Ok(listener) => Ok(listener),
        Err(e) => {
            tracing::warn!("Failed to bind IPv6 dual-stack listener ({}), trying IPv4.", e);

            let str_addr = format!("0.0.0.0:{}", port);
            let addr: SocketAddr = str_addr.parse().expect("valid IPv4 wildcard address");
            tracing::info!("Binding server to {}... (IPv4)", str_addr);

            let socket = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP))?;
            let listener = finish_bind(socket, addr)?;
            Ok((str_addr, listener))
        }
    }
}

fn bind_dual_stack(port: u16) -> std::io::Result<(String, tokio::net::TcpListener)> {
    let str_addr = format!("[::]:{}", port);
    let addr: SocketAddr = str_addr.parse().expect("valid IPv6 wildcard address");
    tracing::info!("Binding server to {}... (IPv6 + IPv4 dual-stack)", str_addr);

    let socket = Socket::new(Domain::IPV6, Type::STREAM, Some(Protocol::TCP))?;

    // Dual-stack mode is not supported everywhere; an IPv6-only socket still
    // serves local clients, so keep going.
    if let Err(e) = socket.set_only_v6(false) {
        tracing::warn!("Failed to set dual-stack mode for IPv6 socket: {}.", e);
    }

    let listener = finish_bind(socket, addr)?;
    Ok((str_addr, listener))
}

fn finish_bind(socket: Socket, addr: SocketAddr) -> std::io::Result<tokio::net::TcpListener> {
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(1024)?;

    // tokio requires a non-blocking socket
    socket.set_nonblocking(true)?;

    let std_listener: std::net::TcpListener = socket.into();
    tokio::net::TcpListener::from_std(std_listener)
}
