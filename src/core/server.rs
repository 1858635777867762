use std::net::SocketAddr;
use std::time::Duration;

/// Bind a non-blocking TCP listener with keepalive and `TCP_NODELAY` set.
pub fn bind_listener(addr: &str, backlog: i32) -> anyhow::Result<tokio::net::TcpListener> {
    let socket_addr: SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(backlog)?;

    Ok(tokio::net::TcpListener::from_std(socket.into())?)
}
